//! The bridge into the game engine.
//!
//! The engine is opaque to this crate: it is reached through a fixed set of
//! one-way calls made on the render thread, and it reaches back through the
//! [`Host`] each call receives.

use std::path::Path;

use crate::{
    graphics::Graphics,
    resources::texture::{TextureLoader, TextureRecord, TextureSlot},
};

/// Requests the engine sends back to the platform side of the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellRequest {
    /// Put the application in the background without finishing it.
    MoveTaskToBack,
}

/// Delivers [`ShellRequest`]s to whatever drives the platform event loop.
pub trait RequestSink: Send {
    fn send(&self, request: ShellRequest);
}

impl RequestSink for winit::event_loop::EventLoopProxy<ShellRequest> {
    fn send(&self, request: ShellRequest) {
        if let Err(e) = self.send_event(request) {
            log::warn!("Dropping {:?}: event loop is gone ({})", request, e);
        }
    }
}

impl RequestSink for tokio::sync::mpsc::UnboundedSender<ShellRequest> {
    fn send(&self, request: ShellRequest) {
        if tokio::sync::mpsc::UnboundedSender::send(self, request).is_err() {
            log::warn!("Dropping {:?}: receiver is gone", request);
        }
    }
}

/// Sink for platforms where no request can be honoured.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreRequests;

impl RequestSink for IgnoreRequests {
    fn send(&self, request: ShellRequest) {
        log::debug!("Ignoring {:?}", request);
    }
}

/// The game engine as seen by the shell, drawing through the backend `G`.
///
/// Every method is fire-and-forget and is only ever called from the render
/// thread, one call at a time. Coordinates passed to the touch methods have
/// their origin in the bottom-left corner of the surface.
pub trait NativeEngine<G>: Send + 'static {
    /// The drawable surface now has the given size. Called before `start` on
    /// first initialization and before `restart` afterwards.
    fn init(&mut self, host: &mut Host<'_, G>, width: u32, height: u32);
    fn start(&mut self, host: &mut Host<'_, G>);
    fn stop(&mut self, host: &mut Host<'_, G>);
    fn restart(&mut self, host: &mut Host<'_, G>);
    fn pause(&mut self, host: &mut Host<'_, G>);
    fn resume(&mut self, host: &mut Host<'_, G>);
    /// Advance and draw one frame.
    fn render(&mut self, host: &mut Host<'_, G>);
    /// The GPU surface was recreated; textures may need to be uploaded again.
    fn reload(&mut self, host: &mut Host<'_, G>);
    fn touch_down(&mut self, host: &mut Host<'_, G>, x: f32, y: f32);
    fn touch_move(&mut self, host: &mut Host<'_, G>, x: f32, y: f32);
    fn touch_up(&mut self, host: &mut Host<'_, G>, x: f32, y: f32);
    fn back_key(&mut self, host: &mut Host<'_, G>);
}

/// Callbacks available to the engine while it handles a call.
pub struct Host<'a, G> {
    pub(crate) textures: &'a mut TextureLoader,
    pub(crate) graphics: &'a mut G,
    pub(crate) files_dir: &'a Path,
    pub(crate) requests: &'a dyn RequestSink,
}

impl<'a, G: Graphics> Host<'a, G> {
    pub fn new(
        textures: &'a mut TextureLoader,
        graphics: &'a mut G,
        files_dir: &'a Path,
        requests: &'a dyn RequestSink,
    ) -> Self {
        Self {
            textures,
            graphics,
            files_dir,
            requests,
        }
    }

    /// The GPU backend owned by the render thread. Textures loaded through
    /// [`Host::load_texture`] live here.
    pub fn graphics(&mut self) -> &mut G {
        &mut *self.graphics
    }

    /// Decode the bundled asset `name` into texture `slot`.
    ///
    /// Returns the decoded dimensions, `(0, 0)` if the asset could not be
    /// loaded or the backend refused it.
    pub fn load_texture(&mut self, slot: TextureSlot, name: &str) -> TextureRecord {
        self.textures.load(&mut *self.graphics, slot, name)
    }

    /// Width of the most recently loaded texture.
    pub fn texture_width(&self) -> u32 {
        self.textures.width()
    }

    /// Height of the most recently loaded texture.
    pub fn texture_height(&self) -> u32 {
        self.textures.height()
    }

    /// Absolute path of the application-private storage directory.
    pub fn files_dir(&self) -> &Path {
        self.files_dir
    }

    pub fn move_task_to_back(&self) {
        self.requests.send(ShellRequest::MoveTaskToBack);
    }
}
