//! The engine's complete interactive vocabulary.
//!
//! Key presses, pointer gestures and on-page buttons all end up as a
//! [`CarouselCommand`] handed to
//! [`CarouselEngine::execute`](super::CarouselEngine::execute).

/// A user-facing carousel operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselCommand {
    // ── Ring ────────────────────────────────────────────────────────
    /// Bring the previous item to the front.
    RotateLeft,

    /// Send the front item to the back.
    RotateRight,

    // ── Pointer ─────────────────────────────────────────────────────
    /// The pointer moved to a new position inside the viewport.
    PointerMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },

    /// The pointer left the viewport. Clears every hover.
    PointerLeft,

    /// Primary click at the last known pointer position.
    Activate,
}

impl CarouselCommand {
    /// Whether this command turns the ring.
    pub fn is_rotation(self) -> bool {
        matches!(self, Self::RotateLeft | Self::RotateRight)
    }
}
