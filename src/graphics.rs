//! The GPU context owned by the render thread.
//!
//! [`Graphics`] is the seam between the renderer state machine and the GPU.
//! [`WgpuGraphics`] is created with the window on the platform thread but
//! only acquires the adapter, device and surface once the render thread sees
//! the first `SurfaceCreated` event, so every GPU object lives on that thread.
//! The surface is dropped on `SurfaceDestroyed` and recreated on the next
//! `SurfaceCreated`; the device and uploaded textures survive both.
//! [`Headless`] stands in when there is nothing to draw to.

use std::{collections::HashMap, sync::Arc};

use anyhow::{Context as _, bail};
use image::RgbaImage;
use winit::window::Window;

use crate::{
    data_structures::texture::{Sampling, Texture},
    resources::texture::TextureSlot,
};

/// Receives decoded textures for a slot.
pub trait TextureSink {
    /// Store `rgba` in `slot`. An error leaves the slot untouched.
    fn upload(
        &mut self,
        slot: TextureSlot,
        rgba: &RgbaImage,
        sampling: &Sampling,
    ) -> anyhow::Result<()>;
}

/// A GPU backend driven by the render thread.
pub trait Graphics: TextureSink + Send + 'static {
    /// The drawable surface exists again (first creation or after the host
    /// destroyed it).
    fn surface_created(&mut self) -> anyhow::Result<()>;

    /// The host destroyed the drawable surface. Nothing may be presented
    /// until the next [`Graphics::surface_created`].
    fn surface_destroyed(&mut self);

    /// The drawable surface has a new size.
    fn surface_changed(&mut self, width: u32, height: u32);
}

/// Backend without a GPU. Uploads are logged and dropped.
#[derive(Debug, Default)]
pub struct Headless;

impl TextureSink for Headless {
    fn upload(
        &mut self,
        slot: TextureSlot,
        rgba: &RgbaImage,
        _: &Sampling,
    ) -> anyhow::Result<()> {
        log::trace!(
            "headless upload into {:?} ({}x{})",
            slot,
            rgba.width(),
            rgba.height()
        );
        Ok(())
    }
}

impl Graphics for Headless {
    fn surface_created(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    fn surface_destroyed(&mut self) {}

    fn surface_changed(&mut self, _: u32, _: u32) {}
}

/// Device, queue and surface plus the textures uploaded per slot.
#[derive(Debug)]
pub struct GpuContext {
    instance: wgpu::Instance,
    adapter: wgpu::Adapter,
    /// `None` while the host has no window to draw to.
    pub surface: Option<wgpu::Surface<'static>>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: Option<wgpu::SurfaceConfiguration>,
    textures: HashMap<TextureSlot, Texture>,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        log::info!("Acquiring GPU");
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("shell device"),
                // The engine targets GLES-class hardware.
                required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                ..Default::default()
            })
            .await
            .context("cannot open the GPU device")?;

        Ok(Self {
            instance,
            adapter,
            surface: Some(surface),
            device,
            queue,
            config: None,
            textures: HashMap::new(),
        })
    }

    /// Replace the surface after the host destroyed the previous one.
    /// The device and every uploaded texture survive.
    pub fn recreate_surface(&mut self, window: Arc<Window>) -> anyhow::Result<()> {
        let surface = self
            .instance
            .create_surface(window)
            .context("cannot recreate the surface")?;
        if let Some(config) = &self.config {
            surface.configure(&self.device, config);
        }
        self.surface = Some(surface);
        Ok(())
    }

    pub fn drop_surface(&mut self) {
        if self.surface.take().is_some() {
            log::debug!("GPU surface dropped");
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(surface) = &self.surface else {
            log::warn!("Resize to {}x{} without a surface", width, height);
            return;
        };
        let config = match self.config.take() {
            Some(mut config) => {
                config.width = width;
                config.height = height;
                Some(config)
            }
            None => surface.get_default_config(&self.adapter, width, height),
        };
        match config {
            Some(config) => {
                surface.configure(&self.device, &config);
                self.config = Some(config);
            }
            None => log::error!("Surface is not supported by the adapter"),
        }
    }

    pub fn texture(&self, slot: TextureSlot) -> Option<&Texture> {
        self.textures.get(&slot)
    }

    /// Upload `rgba` into `slot`, replacing what was there.
    pub fn upload(
        &mut self,
        slot: TextureSlot,
        rgba: &RgbaImage,
        sampling: &Sampling,
    ) -> anyhow::Result<()> {
        let label = format!("texture slot {}", slot.0);
        let texture = Texture::from_rgba(&self.device, &self.queue, rgba, Some(&label), sampling)?;
        self.textures.insert(slot, texture);
        Ok(())
    }
}

/// `wgpu` backend for a `winit` window.
#[derive(Debug)]
pub struct WgpuGraphics {
    window: Arc<Window>,
    gpu: Option<GpuContext>,
}

impl WgpuGraphics {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window, gpu: None }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// The GPU context, once the first surface was created.
    pub fn gpu(&self) -> Option<&GpuContext> {
        self.gpu.as_ref()
    }

    pub fn gpu_mut(&mut self) -> Option<&mut GpuContext> {
        self.gpu.as_mut()
    }
}

impl TextureSink for WgpuGraphics {
    fn upload(
        &mut self,
        slot: TextureSlot,
        rgba: &RgbaImage,
        sampling: &Sampling,
    ) -> anyhow::Result<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            bail!("the GPU is not ready yet");
        };
        gpu.upload(slot, rgba, sampling)
    }
}

impl Graphics for WgpuGraphics {
    fn surface_created(&mut self) -> anyhow::Result<()> {
        match self.gpu.as_mut() {
            Some(gpu) => gpu.recreate_surface(self.window.clone()),
            None => {
                let gpu = futures::executor::block_on(GpuContext::new(self.window.clone()))?;
                self.gpu = Some(gpu);
                Ok(())
            }
        }
    }

    fn surface_destroyed(&mut self) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.drop_surface();
        }
    }

    fn surface_changed(&mut self, width: u32, height: u32) {
        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(width, height);
        }
    }
}
