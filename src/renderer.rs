//! The render-thread state machine.
//!
//! [`Renderer`] owns the engine, the GPU backend and the texture loader and
//! turns each [`SurfaceEvent`] into at most a handful of engine calls. It is a
//! plain value: the render surface moves it onto its thread, and tests drive it
//! directly.
//!
//! # Lifecycle
//!
//! ```text
//!            SurfaceChanged                 Pause
//!   Uninit ----------------> Ready(false) --------> Ready(true)
//!                              ^   ^                   |
//!                              |   +------ Resume -----+
//!                              +---------- Stop -------+
//! ```
//!
//! `Stop` forwards a stop and clears the paused flag without forwarding a
//! resume. From then on pause, resume, stop and frames are dropped until the
//! next `SurfaceChanged` restarts and resumes the engine, so forwarded pauses
//! never run more than one ahead of forwarded resumes.

use std::path::{Path, PathBuf};

use crate::{
    config::RenderMode,
    engine::{Host, IgnoreRequests, NativeEngine, RequestSink},
    event::{SurfaceEvent, TouchAction},
    graphics::Graphics,
    resources::{
        assets::AssetSource,
        texture::{TextureLoader, TextureRecord},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceState {
    #[default]
    Uninit,
    Ready {
        paused: bool,
    },
}

impl SurfaceState {
    pub fn is_ready(self) -> bool {
        matches!(self, SurfaceState::Ready { .. })
    }

    pub fn is_paused(self) -> bool {
        matches!(self, SurfaceState::Ready { paused: true })
    }
}

pub struct Renderer<E, G> {
    engine: E,
    graphics: G,
    textures: TextureLoader,
    files_dir: PathBuf,
    requests: Box<dyn RequestSink>,
    state: SurfaceState,
    width: u32,
    height: u32,
    // The host stops drawing between a pause and the next resume, whatever
    // the engine state.
    host_paused: bool,
    // Set by a forwarded stop, cleared by the next surface change.
    stopped: bool,
    dirty: bool,
}

impl<E: NativeEngine<G>, G: Graphics> Renderer<E, G> {
    pub fn new(
        engine: E,
        graphics: G,
        assets: Box<dyn AssetSource>,
        files_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            graphics,
            textures: TextureLoader::new(assets),
            files_dir: files_dir.into(),
            requests: Box::new(IgnoreRequests),
            state: SurfaceState::Uninit,
            width: 0,
            height: 0,
            host_paused: false,
            stopped: false,
            dirty: false,
        }
    }

    /// Where [`Host::move_task_to_back`] requests go.
    pub fn with_requests(mut self, requests: impl RequestSink + 'static) -> Self {
        self.requests = Box::new(requests);
        self
    }

    pub fn handle(&mut self, event: SurfaceEvent) {
        log::trace!("render thread: {:?} in {:?}", event, self.state);
        match event {
            SurfaceEvent::SurfaceCreated => self.on_surface_created(),
            SurfaceEvent::SurfaceDestroyed => self.graphics.surface_destroyed(),
            SurfaceEvent::SurfaceChanged { width, height } => {
                self.on_surface_changed(width, height)
            }
            SurfaceEvent::Pause => self.on_pause(),
            SurfaceEvent::Resume => self.on_resume(),
            SurfaceEvent::Stop => self.on_stop(),
            SurfaceEvent::Touch { action, x, y } => self.on_touch(action, x, y),
            SurfaceEvent::BackKey => self.on_back_key(),
            SurfaceEvent::RequestRender => self.dirty = true,
            // Owned by the render loop.
            SurfaceEvent::Shutdown => {}
        }
    }

    /// Whether a frame is due under `mode`, ignoring timing.
    pub fn wants_frame(&self, mode: RenderMode) -> bool {
        if !self.can_draw() {
            return false;
        }
        match mode {
            RenderMode::Continuously => true,
            RenderMode::WhenDirty => self.dirty,
        }
    }

    /// Forward one `render` call if the surface can draw. Returns whether a
    /// frame was drawn.
    pub fn draw_frame(&mut self) -> bool {
        self.dirty = false;
        if !self.can_draw() {
            return false;
        }
        self.call(|engine, host| engine.render(host));
        true
    }

    fn can_draw(&self) -> bool {
        self.state.is_ready() && !self.host_paused && !self.stopped
    }

    fn on_surface_created(&mut self) {
        if let Err(e) = self.graphics.surface_created() {
            log::error!("GPU surface unavailable: {:#}", e);
        }
        if self.state.is_ready() {
            self.call(|engine, host| engine.reload(host));
        }
    }

    fn on_surface_changed(&mut self, width: u32, height: u32) {
        log::debug!("surface changed to {}x{}", width, height);
        self.graphics.surface_changed(width, height);
        self.width = width;
        self.height = height;

        let first = !self.state.is_ready();
        self.call(|engine, host| {
            engine.init(host, width, height);
            if first {
                engine.start(host);
            } else {
                engine.restart(host);
            }
            engine.resume(host);
        });
        self.state = SurfaceState::Ready { paused: false };
        self.stopped = false;
        self.dirty = true;
    }

    fn on_pause(&mut self) {
        self.host_paused = true;
        if self.stopped {
            log::trace!("pause ignored while stopped");
        } else if self.state == (SurfaceState::Ready { paused: false }) {
            self.call(|engine, host| engine.pause(host));
            self.state = SurfaceState::Ready { paused: true };
        } else {
            log::trace!("pause ignored in {:?}", self.state);
        }
    }

    fn on_resume(&mut self) {
        self.host_paused = false;
        if self.stopped {
            log::trace!("resume ignored while stopped");
        } else if self.state.is_paused() {
            self.call(|engine, host| engine.resume(host));
            self.state = SurfaceState::Ready { paused: false };
        } else {
            log::trace!("resume ignored in {:?}", self.state);
        }
    }

    fn on_stop(&mut self) {
        if self.state.is_ready() && !self.stopped {
            self.call(|engine, host| engine.stop(host));
            self.state = SurfaceState::Ready { paused: false };
            self.stopped = true;
        } else {
            log::trace!("stop ignored in {:?}", self.state);
        }
    }

    fn on_touch(&mut self, action: TouchAction, x: f32, y: f32) {
        if !self.state.is_ready() {
            log::trace!("touch {:?} dropped before initialization", action);
            return;
        }
        // The engine's origin is bottom-left.
        let y = self.height as f32 - y;
        self.call(|engine, host| match action {
            TouchAction::Down => engine.touch_down(host, x, y),
            TouchAction::Move => engine.touch_move(host, x, y),
            TouchAction::Up => engine.touch_up(host, x, y),
        });
    }

    fn on_back_key(&mut self) {
        if self.state.is_ready() {
            self.call(|engine, host| engine.back_key(host));
        } else {
            log::trace!("back key dropped before initialization");
        }
    }

    fn call(&mut self, f: impl FnOnce(&mut E, &mut Host<'_, G>)) {
        let mut host = Host::new(
            &mut self.textures,
            &mut self.graphics,
            &self.files_dir,
            &*self.requests,
        );
        f(&mut self.engine, &mut host);
    }
}

impl<E, G> Renderer<E, G> {
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    /// Whether a stop was forwarded and no surface change has followed yet.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn surface_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn texture_record(&self) -> TextureRecord {
        self.textures.record()
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn graphics(&self) -> &G {
        &self.graphics
    }

    pub fn into_engine(self) -> E {
        self.engine
    }
}
