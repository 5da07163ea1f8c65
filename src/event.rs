//! Events crossing from the platform threads to the render thread.
//!
//! Every task on the render queue is a plain [`SurfaceEvent`] record. The
//! renderer interprets it on the render thread; nothing here captures state.

/// Touch phase as forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// One task on the render queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// The drawable surface was (re)created.
    SurfaceCreated,
    /// The host destroyed the drawable surface.
    SurfaceDestroyed,
    /// The drawable surface has a new size. This is the initialization
    /// trigger for the engine.
    SurfaceChanged { width: u32, height: u32 },
    Pause,
    Resume,
    Stop,
    /// Primary pointer in surface coordinates, origin top-left.
    Touch { action: TouchAction, x: f32, y: f32 },
    BackKey,
    /// Draw a frame at the next opportunity in `when_dirty` mode.
    RequestRender,
    /// Stop the render thread after every earlier event has run.
    Shutdown,
}

/// Action of an OS motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
    Cancel,
    /// Anything else the OS reports (secondary pointers, hover, ...).
    Other,
}

/// An OS motion event reduced to its primary pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub x: f32,
    pub y: f32,
}

impl MotionEvent {
    pub fn new(action: MotionAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }

    /// The render-queue task for this event, if any. A cancelled gesture
    /// ends like a lifted finger.
    pub fn to_surface_event(self) -> Option<SurfaceEvent> {
        let action = match self.action {
            MotionAction::Down => TouchAction::Down,
            MotionAction::Move => TouchAction::Move,
            MotionAction::Up | MotionAction::Cancel => TouchAction::Up,
            MotionAction::Other => return None,
        };
        Some(SurfaceEvent::Touch {
            action,
            x: self.x,
            y: self.y,
        })
    }
}
