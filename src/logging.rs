/// Install the `log` backend.
///
/// Desktop builds use `env_logger`, with `RUST_LOG` selecting the level.
/// Later calls leave the installed logger in place and print a warning.
#[cfg(not(target_os = "android"))]
pub fn init() {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }
}

/// Install the `log` backend.
///
/// Android discards stderr, so records go to logcat under the `sudoku` tag.
#[cfg(target_os = "android")]
pub fn init() {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("sudoku"),
    );
}
