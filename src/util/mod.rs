//! Shared utilities: per-frame smoothing math and frame pacing.

pub mod frame_timing;
pub mod smoothing;
