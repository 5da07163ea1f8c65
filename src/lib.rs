//! sudoku-shell
//!
//! The platform layer of a native game: it owns the host window's lifecycle,
//! a dedicated render thread, and the loading of bundled textures, and it
//! drives an opaque game engine through a fixed set of one-way calls.
//!
//! High-level modules
//! - `activity`: lifecycle callbacks forwarded to the render surface
//! - `surface`: the render thread and its FIFO event queue
//! - `renderer`: the state machine running on the render thread
//! - `engine`: the [`NativeEngine`] trait and the [`Host`] callbacks
//! - `graphics`: the GPU context owned by the render thread
//! - `resources`: bundled assets and the texture loader
//! - `app`: the `winit` event loop driving the activity
//!
//! Every lifecycle or input event becomes one [`SurfaceEvent`] on the render
//! queue, handled strictly in submission order:
//!
//! ```text
//! OS -> Activity -> RenderSurface (queue) -> render thread -> NativeEngine
//! ```
//!

pub mod activity;
#[cfg(target_os = "android")]
pub mod android;
pub mod app;
pub mod config;
pub mod data_structures;
pub mod engine;
pub mod error;
pub mod event;
pub mod graphics;
pub mod logging;
pub mod renderer;
pub mod resources;
pub mod surface;

// Re-exports commonly used types for convenience in downstream code.
pub use activity::{Activity, BackDisposition};
pub use config::{RenderMode, ShellConfig};
pub use engine::{Host, NativeEngine, ShellRequest};
pub use error::ShellError;
pub use event::{MotionAction, MotionEvent, SurfaceEvent, TouchAction};
pub use renderer::{Renderer, SurfaceState};
pub use resources::texture::{TextureRecord, TextureSlot};
pub use surface::{RenderSurface, SurfaceHandle};
