//! Android entry point.
//!
//! The game crate exports `android_main` and hands the `AndroidApp` over:
//!
//! ```ignore
//! #[unsafe(no_mangle)]
//! fn android_main(app: AndroidApp) {
//!     if let Err(e) = sudoku_shell::android::run_android(app, Game::default(), Default::default()) {
//!         log::error!("{e:#}");
//!     }
//! }
//! ```

use winit::{
    event_loop::EventLoop,
    platform::android::{EventLoopBuilderExtAndroid, activity::AndroidApp},
};

pub use winit::platform::android::activity;

use crate::{
    app::{ShellApp, prepare_files_dir},
    config::ShellConfig,
    engine::{NativeEngine, ShellRequest},
    graphics::WgpuGraphics,
    resources::assets::AndroidAssets,
};

/// Run the shell inside the native activity until it is destroyed.
///
/// Assets come from the APK and the storage directory is the app's internal
/// data path; `config.assets_dir` and `config.files_dir` are ignored.
pub fn run_android<E: NativeEngine<WgpuGraphics>>(
    app: AndroidApp,
    engine: E,
    config: ShellConfig,
) -> anyhow::Result<()> {
    crate::logging::init();

    let files_dir = match app.internal_data_path() {
        Some(path) => prepare_files_dir(&path)?,
        None => anyhow::bail!("the activity has no internal data path"),
    };
    let assets = Box::new(AndroidAssets::new(app.clone()));

    let event_loop: EventLoop<ShellRequest> = EventLoop::with_user_event()
        .with_android_app(app)
        .build()?;
    let mut shell = ShellApp::new(&event_loop, engine, assets, files_dir, config);
    event_loop.run_app(&mut shell)?;

    Ok(())
}
