use crate::{
    data_structures::texture::Sampling, graphics::TextureSink, resources::assets::AssetSource,
};

/// The engine's name for a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureSlot(pub u32);

/// Dimensions of the most recently decoded image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureRecord {
    pub width: u32,
    pub height: u32,
}

/// Decodes bundled images and hands them to a [`TextureSink`].
///
/// Runs synchronously on the calling thread, which is always the render
/// thread. Failures never reach the caller: a missing or undecodable asset,
/// or one the sink refuses, is logged and leaves the record at zero.
pub struct TextureLoader {
    assets: Box<dyn AssetSource>,
    record: TextureRecord,
}

impl TextureLoader {
    pub fn new(assets: Box<dyn AssetSource>) -> Self {
        Self {
            assets,
            record: TextureRecord::default(),
        }
    }

    pub fn load(
        &mut self,
        sink: &mut dyn TextureSink,
        slot: TextureSlot,
        name: &str,
    ) -> TextureRecord {
        self.record = TextureRecord::default();

        let rgba = match decode(self.assets.as_ref(), name) {
            Ok(rgba) => rgba,
            Err(e) => {
                log::warn!("Unable to load texture {} into {:?}: {:#}", name, slot, e);
                return self.record;
            }
        };

        if let Err(e) = sink.upload(slot, &rgba, &Sampling::ENGINE) {
            log::warn!("Unable to upload texture {} into {:?}: {:#}", name, slot, e);
            return self.record;
        }
        self.record = TextureRecord {
            width: rgba.width(),
            height: rgba.height(),
        };
        log::debug!(
            "Texture {} -> {:?}: {}x{}",
            name,
            slot,
            self.record.width,
            self.record.height
        );
        // `rgba` is dropped here, right after the upload.
        self.record
    }

    pub fn width(&self) -> u32 {
        self.record.width
    }

    pub fn height(&self) -> u32 {
        self.record.height
    }

    pub fn record(&self) -> TextureRecord {
        self.record
    }
}

fn decode(assets: &dyn AssetSource, name: &str) -> anyhow::Result<image::RgbaImage> {
    let bytes = assets.open(name)?;
    let img = image::load_from_memory(&bytes)?;
    Ok(img.into_rgba8())
}
