use std::path::{Component, Path, PathBuf};

use anyhow::{Context, bail};

/// A read-only store of named assets bundled with the application.
pub trait AssetSource: Send {
    fn open(&self, name: &str) -> anyhow::Result<Vec<u8>>;
}

/// Assets stored as plain files below a directory, `./assets` by default.
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(name);
        // Asset names never leave the store.
        if !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        {
            bail!("invalid asset name {name:?}");
        }
        Ok(self.root.join(relative))
    }
}

impl AssetSource for DirAssets {
    fn open(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(name)?;
        std::fs::read(&path).with_context(|| format!("cannot read asset {}", path.display()))
    }
}

/// Assets packaged inside the APK.
#[cfg(target_os = "android")]
pub struct AndroidAssets {
    app: winit::platform::android::activity::AndroidApp,
}

#[cfg(target_os = "android")]
impl AndroidAssets {
    pub fn new(app: winit::platform::android::activity::AndroidApp) -> Self {
        Self { app }
    }
}

#[cfg(target_os = "android")]
impl AssetSource for AndroidAssets {
    fn open(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        use std::io::Read;

        let c_name = std::ffi::CString::new(name)?;
        let mut asset = self
            .app
            .asset_manager()
            .open(&c_name)
            .with_context(|| format!("asset {name:?} not found"))?;
        let mut bytes = Vec::new();
        asset.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
