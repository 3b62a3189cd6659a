//! Fixed perspective camera looking at the ring, plus the screen-to-world
//! conversions picking needs.

/// Core camera struct and GPU uniform types.
pub mod core;

pub use self::core::{Camera, CameraUniform};
