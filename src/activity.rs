//! The activity shell.
//!
//! Receives the host's lifecycle callbacks and forwards the meaningful ones to
//! the render surface. It holds no state besides the surface itself, and no
//! callback does anything before the surface exists.

use crate::{
    config::ShellConfig,
    engine::NativeEngine,
    error::ShellError,
    graphics::Graphics,
    renderer::Renderer,
    surface::RenderSurface,
};

/// What the host should do after a back press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackDisposition {
    /// The engine received the back key; the host does nothing.
    Consumed,
    /// No surface: the host applies its default (finish the activity).
    Default,
}

pub struct Activity<E, G> {
    config: ShellConfig,
    surface: Option<RenderSurface<E, G>>,
}

impl<E: NativeEngine<G>, G: Graphics> Activity<E, G> {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            surface: None,
        }
    }

    /// Create the render surface. A second call keeps the existing surface
    /// and drops `renderer`.
    pub fn on_create(&mut self, renderer: Renderer<E, G>) -> Result<(), ShellError> {
        log::debug!("onCreate()");
        if self.surface.is_none() {
            self.surface = Some(RenderSurface::new(renderer, &self.config)?);
        }
        Ok(())
    }

    pub fn on_start(&mut self) {
        log::debug!("onStart()");
    }

    pub fn on_restart(&mut self) {
        log::debug!("onRestart()");
    }

    pub fn on_resume(&mut self) {
        log::debug!("onResume()");
        self.forward("resume", |surface| surface.on_resume());
    }

    pub fn on_pause(&mut self) {
        log::debug!("onPause()");
        self.forward("pause", |surface| surface.on_pause());
    }

    pub fn on_stop(&mut self) {
        log::debug!("onStop()");
        self.forward("stop", |surface| surface.on_stop());
    }

    pub fn on_destroy(&mut self) {
        log::debug!("onDestroy()");
    }

    pub fn on_back_pressed(&mut self) -> BackDisposition {
        match &self.surface {
            Some(surface) => {
                if let Err(e) = surface.on_key_back() {
                    log::error!("Cannot forward back key: {}", e);
                }
                BackDisposition::Consumed
            }
            None => BackDisposition::Default,
        }
    }
}

impl<E, G> Activity<E, G> {
    pub fn surface(&self) -> Option<&RenderSurface<E, G>> {
        self.surface.as_ref()
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Shut the render surface down and hand back the renderer.
    pub fn finish(&mut self) -> Option<Result<Renderer<E, G>, ShellError>> {
        self.surface.take().map(RenderSurface::shutdown)
    }

    fn forward(
        &self,
        what: &str,
        f: impl FnOnce(&RenderSurface<E, G>) -> Result<(), ShellError>,
    ) {
        if let Some(surface) = &self.surface {
            if let Err(e) = f(surface) {
                log::error!("Cannot forward {}: {}", what, e);
            }
        }
    }
}
