use std::{path::PathBuf, time::Duration};

use sudoku_shell::{RenderMode, ShellConfig};

#[test]
fn should_default_to_continuous_rendering_from_local_dirs() {
    let config = ShellConfig::default();

    assert_eq!(config.render_mode, RenderMode::Continuously);
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
    assert_eq!(config.assets_dir, PathBuf::from("./assets"));
    assert_eq!(config.files_dir, PathBuf::from("./files"));
}

#[test]
fn should_fill_missing_keys_with_defaults() {
    let config = ShellConfig::from_toml_str(
        r#"
        render_mode = "when_dirty"
        assets_dir = "/opt/sudoku/assets"
        "#,
    )
    .unwrap();

    assert_eq!(config.render_mode, RenderMode::WhenDirty);
    assert_eq!(config.assets_dir, PathBuf::from("/opt/sudoku/assets"));
    assert_eq!(config.title, ShellConfig::default().title);
    assert_eq!(config.frame_interval_millis, 16);
}

#[test]
fn should_reject_unknown_render_modes() {
    assert!(ShellConfig::from_toml_str(r#"render_mode = "sometimes""#).is_err());
}

#[test]
fn should_never_use_a_zero_frame_interval() {
    let config = ShellConfig::from_toml_str("frame_interval_millis = 0").unwrap();
    assert_eq!(config.frame_interval(), Duration::from_millis(1));
}

#[test]
fn should_fall_back_to_defaults_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = ShellConfig::load_or_default(dir.path().join("shell.toml"));
    assert_eq!(config, ShellConfig::default());

    std::fs::write(dir.path().join("shell.toml"), "title = \"Puzzle\"").unwrap();
    let config = ShellConfig::load_or_default(dir.path().join("shell.toml"));
    assert_eq!(config.title, "Puzzle");
}
