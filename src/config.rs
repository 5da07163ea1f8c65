use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

/// How the render thread schedules frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Draw a frame every `frame_interval_millis`.
    #[default]
    Continuously,
    /// Draw only after a render request or a surface size change.
    WhenDirty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Window title on desktop.
    pub title: String,
    pub render_mode: RenderMode,
    pub frame_interval_millis: u64,
    /// Root of the bundled asset store on desktop.
    pub assets_dir: std::path::PathBuf,
    /// Application-private storage on desktop.
    pub files_dir: std::path::PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            title: String::from("Sudoku"),
            render_mode: RenderMode::Continuously,
            frame_interval_millis: 16,
            assets_dir: "./assets".into(),
            files_dir: "./files".into(),
        }
    }
}

impl ShellConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::from_file(path.as_ref()).unwrap_or_else(|err| {
            log::warn!(
                "Failed to load config {}: {err}, falling back to default",
                path.as_ref().display()
            );
            Self::default()
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_millis.max(1))
    }
}
