//! Host integration and the platform event loop.
//!
//! [`ShellApp`] plays the part of the operating system for the [`Activity`]:
//! it translates `winit` callbacks into activity lifecycle calls, surface
//! hooks and motion events. The same handler runs on desktop and on Android.
//!
//! # Mapping
//!
//! - `resumed`: create window and surface on first call, then
//!   start/resume and announce the surface with its size
//! - `suspended`: pause, stop and destroy the surface
//! - `Resized`: surface changed (only when the size actually changed)
//! - `Touch` and left-button drags: motion events for the primary pointer
//! - back or escape: back press, exiting when nothing consumed it
//! - `CloseRequested`: pause, stop, destroy and exit

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, TouchPhase, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::{
    activity::{Activity, BackDisposition},
    config::ShellConfig,
    engine::{NativeEngine, ShellRequest},
    event::{MotionAction, MotionEvent},
    graphics::WgpuGraphics,
    renderer::Renderer,
    resources::assets::{AssetSource, DirAssets},
};

/// Reduces touches and mouse drags to a single primary pointer.
///
/// The first finger down owns the gesture until it lifts or is cancelled;
/// other fingers produce nothing. A left-button drag acts as a touch.
#[derive(Debug, Default)]
pub struct PointerTracker {
    primary_touch: Option<u64>,
    mouse_down: bool,
    cursor: PhysicalPosition<f64>,
}

impl PointerTracker {
    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> Option<MotionEvent> {
        let is_primary = self.primary_touch == Some(id);
        let action = match phase {
            TouchPhase::Started if self.primary_touch.is_none() => {
                self.primary_touch = Some(id);
                MotionAction::Down
            }
            TouchPhase::Moved if is_primary => MotionAction::Move,
            TouchPhase::Ended if is_primary => {
                self.primary_touch = None;
                MotionAction::Up
            }
            TouchPhase::Cancelled if is_primary => {
                self.primary_touch = None;
                MotionAction::Cancel
            }
            _ => return None,
        };
        Some(motion(action, location))
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> Option<MotionEvent> {
        self.cursor = position;
        self.mouse_down.then(|| motion(MotionAction::Move, position))
    }

    pub fn left_button(&mut self, state: ElementState) -> Option<MotionEvent> {
        match (state, self.mouse_down) {
            (ElementState::Pressed, false) => {
                self.mouse_down = true;
                Some(motion(MotionAction::Down, self.cursor))
            }
            (ElementState::Released, true) => {
                self.mouse_down = false;
                Some(motion(MotionAction::Up, self.cursor))
            }
            _ => None,
        }
    }
}

fn motion(action: MotionAction, position: PhysicalPosition<f64>) -> MotionEvent {
    MotionEvent::new(action, position.x as f32, position.y as f32)
}

pub struct ShellApp<E: NativeEngine<WgpuGraphics>> {
    proxy: EventLoopProxy<ShellRequest>,
    activity: Activity<E, WgpuGraphics>,
    // Moved into the renderer when the first window exists.
    engine: Option<E>,
    assets: Option<Box<dyn AssetSource>>,
    files_dir: PathBuf,
    window: Option<Arc<Window>>,
    surface_size: Option<PhysicalSize<u32>>,
    pointer: PointerTracker,
}

impl<E: NativeEngine<WgpuGraphics>> ShellApp<E> {
    pub fn new(
        event_loop: &EventLoop<ShellRequest>,
        engine: E,
        assets: Box<dyn AssetSource>,
        files_dir: PathBuf,
        config: ShellConfig,
    ) -> Self {
        Self {
            proxy: event_loop.create_proxy(),
            activity: Activity::new(config),
            engine: Some(engine),
            assets: Some(assets),
            files_dir,
            window: None,
            surface_size: None,
            pointer: PointerTracker::default(),
        }
    }

    fn create_surface(&mut self, window: &Arc<Window>) -> anyhow::Result<()> {
        let (Some(engine), Some(assets)) = (self.engine.take(), self.assets.take()) else {
            anyhow::bail!("engine was already handed to a render surface");
        };
        let renderer = Renderer::new(
            engine,
            WgpuGraphics::new(window.clone()),
            assets,
            self.files_dir.clone(),
        )
        .with_requests(self.proxy.clone());
        self.activity.on_create(renderer)?;
        Ok(())
    }

    fn announce_size(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 || self.surface_size == Some(size) {
            return;
        }
        if let Some(surface) = self.activity.surface() {
            match surface.surface_changed(size.width, size.height) {
                Ok(()) => self.surface_size = Some(size),
                Err(e) => log::error!("Cannot announce surface size: {}", e),
            }
        }
    }

    fn forward_motion(&self, motion: Option<MotionEvent>) {
        let (Some(motion), Some(surface)) = (motion, self.activity.surface()) else {
            return;
        };
        if let Err(e) = surface.on_touch_event(motion) {
            log::error!("Cannot forward {:?}: {}", motion.action, e);
        }
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        self.activity.on_pause();
        self.activity.on_stop();
        self.activity.on_destroy();
        if let Some(Err(e)) = self.activity.finish() {
            log::error!("{}", e);
        }
        event_loop.exit();
    }
}

impl<E: NativeEngine<WgpuGraphics>> ApplicationHandler<ShellRequest> for ShellApp<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window = match &self.window {
            Some(window) => {
                self.activity.on_restart();
                window.clone()
            }
            None => {
                let attributes =
                    Window::default_attributes().with_title(self.activity.config().title.clone());
                match event_loop.create_window(attributes) {
                    Ok(window) => Arc::new(window),
                    Err(e) => {
                        log::error!("Cannot create the window: {}", e);
                        event_loop.exit();
                        return;
                    }
                }
            }
        };

        if self.activity.surface().is_none() {
            if let Err(e) = self.create_surface(&window) {
                log::error!("Cannot create the render surface: {:#}", e);
                event_loop.exit();
                return;
            }
        }
        self.window = Some(window.clone());

        self.activity.on_start();
        self.activity.on_resume();
        if let Some(surface) = self.activity.surface() {
            if let Err(e) = surface.surface_created() {
                log::error!("Cannot announce the surface: {}", e);
            }
        }
        self.announce_size(window.inner_size());
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.activity.on_pause();
        self.activity.on_stop();
        // The native window is gone; the GPU surface must not outlive it.
        if let Some(surface) = self.activity.surface() {
            if let Err(e) = surface.surface_destroyed() {
                log::error!("Cannot release the surface: {}", e);
            }
        }
        // The next resume announces the surface again.
        self.surface_size = None;
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ShellRequest) {
        match event {
            ShellRequest::MoveTaskToBack => {
                if let Some(window) = &self.window {
                    window.set_minimized(true);
                }
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.close(event_loop),
            WindowEvent::Resized(size) => self.announce_size(size),
            WindowEvent::Touch(touch) => {
                let motion = self.pointer.touch(touch.id, touch.phase, touch.location);
                self.forward_motion(motion);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let motion = self.pointer.cursor_moved(position);
                self.forward_motion(motion);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let motion = self.pointer.left_button(state);
                self.forward_motion(motion);
            }
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                if let Key::Named(NamedKey::BrowserBack | NamedKey::Escape) = event.logical_key {
                    if self.activity.on_back_pressed() == BackDisposition::Default {
                        self.close(event_loop);
                    }
                }
            }
            // Frames are paced by the render thread.
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(Err(e)) = self.activity.finish() {
            log::error!("{}", e);
        }
    }
}

/// Create the storage directory if needed and return its absolute path.
pub fn prepare_files_dir(path: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(path)?;
    Ok(std::fs::canonicalize(path)?)
}

/// Run the shell on desktop until the window closes.
pub fn run<E>(engine: E, config: ShellConfig) -> anyhow::Result<()>
where
    E: NativeEngine<WgpuGraphics>,
{
    crate::logging::init();

    let files_dir = prepare_files_dir(&config.files_dir)?;
    let assets = Box::new(DirAssets::new(config.assets_dir.clone()));

    let event_loop: EventLoop<ShellRequest> = EventLoop::with_user_event().build()?;
    let mut app = ShellApp::new(&event_loop, engine, assets, files_dir, config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
