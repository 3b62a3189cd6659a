//! Rotating 3D channel-menu carousel, rendered with wgpu.
//!
//! A ring of cubes turns around a vertical axis. Rotate buttons or keys step
//! it one slot at a time, hovering an item lights it up, and clicking it
//! routes to an internal page or opens an external link.
//!
//! # Key entry points
//!
//! - [`engine::CarouselEngine`] - platform-independent menu state machine
//! - [`options::Options`] - runtime configuration (ring, camera, lighting,
//!   sounds, items, key bindings)
//! - [`gpu::CarouselRenderer`] - draws the ring into a window or canvas
//! - [`engine::Host`] - the seam where sounds and navigation leave the engine
//!
//! # Architecture
//!
//! Front ends feed pointer and key events into the engine, call
//! [`CarouselEngine::update`] once per frame, render the resulting
//! placements and then flush queued effects into their host. The native
//! viewer (feature `viewer`) logs effects. The browser front end (feature
//! `web`, `wasm32` only) plays them through `<audio>` elements and a
//! history-backed page router.

pub mod camera;
pub mod carousel;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod navigation;
pub mod options;
pub mod picking;
pub mod util;

#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::{CarouselCommand, CarouselEngine};
pub use error::CarouselError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
