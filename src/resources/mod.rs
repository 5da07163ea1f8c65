//! Loading textures from the bundled asset store.

pub mod assets;
pub mod texture;
