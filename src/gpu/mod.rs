//! GPU resources: wgpu device/surface initialization and the instanced
//! cube renderer that draws the ring.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Shared wgpu boilerplate helpers.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Instanced cube pipeline for the carousel items.
pub mod renderer;

pub use render_context::{RenderContext, RenderContextError};
pub use renderer::CarouselRenderer;
