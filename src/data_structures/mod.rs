//! Data structures owned by the GPU backend.
//!
//! - `texture` contains the GPU texture wrapper and slot sampling state

pub mod texture;
