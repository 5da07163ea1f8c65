//! The render surface: one render thread and the queue feeding it.
//!
//! Platform callbacks arrive on arbitrary threads. Each one is turned into a
//! single [`SurfaceEvent`] and pushed onto an unbounded queue without
//! blocking. The render thread is the only consumer: it takes events in
//! submission order, runs each to completion on the [`Renderer`], and draws
//! frames in between.
//!
//! The render thread runs a current-thread `tokio` runtime purely to wait on
//! the queue with a frame deadline. No renderer code is ever suspended.

use std::{
    ops::Deref,
    thread::{self, JoinHandle},
    time::Duration,
};

use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    time::Instant,
};

use crate::{
    config::{RenderMode, ShellConfig},
    engine::NativeEngine,
    error::ShellError,
    event::{MotionEvent, SurfaceEvent},
    graphics::Graphics,
    renderer::Renderer,
};

/// Cloneable sending side of the render queue.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    sender: UnboundedSender<SurfaceEvent>,
}

impl SurfaceHandle {
    /// Enqueue one event. Never blocks.
    pub fn queue_event(&self, event: SurfaceEvent) -> Result<(), ShellError> {
        self.sender.send(event).map_err(|_| ShellError::QueueClosed)
    }

    pub fn on_pause(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::Pause)
    }

    pub fn on_resume(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::Resume)
    }

    pub fn on_stop(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::Stop)
    }

    /// Forward the primary pointer of a motion event. Actions the engine has
    /// no call for are consumed without queueing anything.
    pub fn on_touch_event(&self, motion: MotionEvent) -> Result<(), ShellError> {
        match motion.to_surface_event() {
            Some(event) => self.queue_event(event),
            None => Ok(()),
        }
    }

    pub fn on_key_back(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::BackKey)
    }

    pub fn surface_created(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::SurfaceCreated)
    }

    pub fn surface_destroyed(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::SurfaceDestroyed)
    }

    pub fn surface_changed(&self, width: u32, height: u32) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::SurfaceChanged { width, height })
    }

    pub fn request_render(&self) -> Result<(), ShellError> {
        self.queue_event(SurfaceEvent::RequestRender)
    }
}

#[derive(Debug, Clone, Copy)]
struct FramePacing {
    mode: RenderMode,
    interval: Duration,
}

/// Owner of the render thread.
///
/// Dereferences to its [`SurfaceHandle`]; clone the handle to post events
/// from other threads.
pub struct RenderSurface<E, G> {
    handle: SurfaceHandle,
    worker: Option<JoinHandle<Renderer<E, G>>>,
}

impl<E: NativeEngine<G>, G: Graphics> RenderSurface<E, G> {
    /// Move `renderer` onto a new render thread.
    pub fn new(renderer: Renderer<E, G>, config: &ShellConfig) -> Result<Self, ShellError> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pacing = FramePacing {
            mode: config.render_mode,
            interval: config.frame_interval(),
        };
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;

        let worker = thread::Builder::new()
            .name(String::from("render"))
            .spawn(move || {
                let mut renderer = renderer;
                let mut receiver = receiver;
                runtime.block_on(render_loop(&mut renderer, &mut receiver, pacing));
                log::debug!("render thread finished");
                renderer
            })?;

        Ok(Self {
            handle: SurfaceHandle { sender },
            worker: Some(worker),
        })
    }
}

impl<E, G> RenderSurface<E, G> {
    pub fn handle(&self) -> SurfaceHandle {
        self.handle.clone()
    }

    /// Let every queued event run, stop the render thread and return the
    /// renderer.
    pub fn shutdown(mut self) -> Result<Renderer<E, G>, ShellError> {
        self.join_worker()
    }

    fn join_worker(&mut self) -> Result<Renderer<E, G>, ShellError> {
        let worker = self.worker.take().ok_or(ShellError::QueueClosed)?;
        // A send error means the thread is already gone; join reports why.
        let _ = self.handle.sender.send(SurfaceEvent::Shutdown);
        worker.join().map_err(|_| ShellError::WorkerPanicked)
    }
}

impl<E, G> Deref for RenderSurface<E, G> {
    type Target = SurfaceHandle;

    fn deref(&self) -> &Self::Target {
        &self.handle
    }
}

impl<E, G> Drop for RenderSurface<E, G> {
    fn drop(&mut self) {
        if self.worker.is_some() {
            if let Err(e) = self.join_worker() {
                log::error!("Render thread did not shut down cleanly: {}", e);
            }
        }
    }
}

async fn render_loop<E: NativeEngine<G>, G: Graphics>(
    renderer: &mut Renderer<E, G>,
    receiver: &mut UnboundedReceiver<SurfaceEvent>,
    pacing: FramePacing,
) {
    let mut next_frame = Instant::now();
    loop {
        let event = if renderer.wants_frame(pacing.mode) {
            // Queued events always run before a due frame.
            match tokio::time::timeout_at(next_frame, receiver.recv()).await {
                Ok(event) => event,
                Err(_) => {
                    renderer.draw_frame();
                    next_frame = Instant::now() + pacing.interval;
                    continue;
                }
            }
        } else {
            receiver.recv().await
        };

        match event {
            Some(SurfaceEvent::Shutdown) | None => break,
            Some(event) => renderer.handle(event),
        }
    }
}
