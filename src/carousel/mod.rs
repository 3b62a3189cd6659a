//! The carousel controller: a ring of selectable items, its target
//! orientation, and per-item animation state.
//!
//! The ring is a fixed-size circular buffer ([`Ring`]); rotating it moves a
//! head index and never reallocates. Per-item animation fields live in a
//! plain record ([`CarouselItem`]) keyed by a stable [`ItemId`], not on
//! scene-graph nodes.

mod item;
mod layout;
mod ring;
mod state;

pub use item::{CarouselItem, ItemId};
pub use layout::{slot_angle, Placement, RingLayout};
pub use ring::Ring;
pub use state::Carousel;

/// Rotation direction of the ring.
///
/// `Right` moves the front item to the back and increases the ring angle;
/// `Left` is its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Bring the previous item to the front (ring angle decreases).
    Left,
    /// Bring the next item to the front (ring angle increases).
    Right,
}
