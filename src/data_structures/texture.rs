//! GPU textures bound to engine texture slots.
//!
//! This module provides [`Texture`], a wrapper around a WGPU texture with its
//! view and sampler, and [`Sampling`], the filter and wrap state the engine
//! expects a slot to be sampled with.

use anyhow::ensure;
use image::RgbaImage;

/// Filter and wrap state for a texture slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    pub min_filter: wgpu::FilterMode,
    pub mag_filter: wgpu::FilterMode,
    pub wrap_u: wgpu::AddressMode,
    pub wrap_v: wgpu::AddressMode,
}

impl Sampling {
    /// Nearest minification, linear magnification, repeat on both axes.
    pub const ENGINE: Sampling = Sampling {
        min_filter: wgpu::FilterMode::Nearest,
        mag_filter: wgpu::FilterMode::Linear,
        wrap_u: wgpu::AddressMode::Repeat,
        wrap_v: wgpu::AddressMode::Repeat,
    };
}

impl Default for Sampling {
    fn default() -> Self {
        Self::ENGINE
    }
}

/// A GPU texture with a view and sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Upload decoded pixels as a new texture.
    ///
    /// Pixels are stored as `Rgba8Unorm` so the engine sees exactly the bytes
    /// of the asset, with no sRGB conversion on sampling. Images the device
    /// cannot hold are rejected before anything is created.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &RgbaImage,
        label: Option<&str>,
        sampling: &Sampling,
    ) -> anyhow::Result<Self> {
        let (width, height) = rgba.dimensions();
        let max = device.limits().max_texture_dimension_2d;
        ensure!(width > 0 && height > 0, "empty image");
        ensure!(
            width <= max && height <= max,
            "{}x{} exceeds the device limit of {}",
            width,
            height,
            max
        );
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            rgba.as_raw(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sampler(device, sampling);

        Ok(Self {
            texture,
            view,
            sampler,
            width,
            height,
        })
    }
}

pub fn create_sampler(device: &wgpu::Device, sampling: &Sampling) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("slot sampler"),
        address_mode_u: sampling.wrap_u,
        address_mode_v: sampling.wrap_v,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: sampling.mag_filter,
        min_filter: sampling.min_filter,
        ..Default::default()
    })
}
