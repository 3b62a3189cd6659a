use glam::Vec3;

use crate::options::ItemOptions;

/// Stable identity of a carousel item: its index in the configured item
/// list. Survives any amount of ring rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub usize);

/// One selectable entry and its animation state.
///
/// The item's angular offset is not stored; it is derived from its ring
/// position each frame.
#[derive(Debug, Clone)]
pub struct CarouselItem {
    /// Stable identity.
    pub id: ItemId,
    /// Human-readable name.
    pub label: String,
    /// Internal path or external URL, unclassified.
    pub destination: String,
    /// Sound played when the item reaches the front, if any.
    pub activation_sound: Option<String>,
    /// Scale the item is animating toward.
    pub target_scale: Vec3,
    /// Scale as currently rendered.
    pub current_scale: Vec3,
    /// Idle spin angle in `[0, 2π)`.
    pub base_spin: f32,
    /// Rotation the item turns toward while hovered.
    pub hover_spin_target: Option<f32>,
    /// Y rotation as currently rendered.
    pub rotation: f32,
    /// Whether the pointer was over this item at the last hit test.
    pub hovered: bool,
}

impl CarouselItem {
    /// Item at rest (scale 1, not hovered) with the given idle spin.
    pub fn new(id: ItemId, options: &ItemOptions, base_spin: f32) -> Self {
        Self {
            id,
            label: options.label.clone(),
            destination: options.destination.clone(),
            activation_sound: options.sound.clone(),
            target_scale: Vec3::ONE,
            current_scale: Vec3::ONE,
            base_spin,
            hover_spin_target: None,
            rotation: base_spin,
            hovered: false,
        }
    }
}
