use std::f32::consts::TAU;

use glam::Vec3;
use rand::Rng;

use super::item::{CarouselItem, ItemId};
use super::layout::{slot_angle, Placement, RingLayout};
use super::ring::Ring;
use super::Direction;
use crate::error::CarouselError;
use crate::options::{CarouselOptions, ItemOptions};
use crate::util::smoothing::{approach, approach_angle, approach_vec3, wrap_angle};

/// The carousel controller: ring order, target orientation, and every
/// item's animated state.
///
/// Commands ([`rotate`](Self::rotate), [`set_hover`](Self::set_hover)) only
/// move targets; [`advance`](Self::advance) is the per-frame step that
/// moves animated values toward them.
#[derive(Debug, Clone)]
pub struct Carousel {
    ring: Ring<CarouselItem>,
    current_angle: f32,
    target_angle: f32,
    elapsed: f32,
    /// Last item seen at ring position 0.
    front: Option<ItemId>,
    tuning: CarouselOptions,
}

impl Carousel {
    /// Build a carousel with random idle spins.
    ///
    /// # Errors
    ///
    /// [`CarouselError::EmptyRing`] if `items` is empty.
    pub fn new(
        items: &[ItemOptions],
        tuning: CarouselOptions,
    ) -> Result<Self, CarouselError> {
        Self::with_rng(items, tuning, &mut rand::rng())
    }

    /// Build a carousel drawing idle spins from `rng`.
    ///
    /// # Errors
    ///
    /// [`CarouselError::EmptyRing`] if `items` is empty.
    pub fn with_rng<R: Rng + ?Sized>(
        items: &[ItemOptions],
        tuning: CarouselOptions,
        rng: &mut R,
    ) -> Result<Self, CarouselError> {
        let items = items
            .iter()
            .enumerate()
            .map(|(index, options)| {
                CarouselItem::new(
                    ItemId(index),
                    options,
                    rng.random_range(0.0..TAU),
                )
            })
            .collect();
        let ring = Ring::new(items).ok_or(CarouselError::EmptyRing)?;
        Ok(Self {
            ring,
            current_angle: 0.0,
            target_angle: 0.0,
            elapsed: 0.0,
            front: None,
            tuning,
        })
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Rotate the ring one slot.
    ///
    /// [`Direction::Right`] sends the front item to the back and advances
    /// the target angle by one slot; [`Direction::Left`] is the exact
    /// inverse. Any number of calls may stack up before the animation
    /// catches up.
    pub fn rotate(&mut self, direction: Direction) {
        let step = slot_angle(self.ring.len());
        match direction {
            Direction::Right => {
                self.ring.rotate_forward();
                self.target_angle += step;
            }
            Direction::Left => {
                self.ring.rotate_backward();
                self.target_angle -= step;
            }
        }
        log::debug!(
            "rotate {direction:?}: front is now {:?}, target angle {:.3}",
            self.ring.front().label,
            self.target_angle
        );
    }

    /// Update the hover state of one item.
    ///
    /// `view_angle` is the viewer's yaw; a newly hovered item turns to face
    /// it. Returns `true` only on the transition into hover, i.e. exactly
    /// when the hover sound should play.
    pub fn set_hover(
        &mut self,
        id: ItemId,
        hovering: bool,
        view_angle: f32,
    ) -> bool {
        let hover_scale = self.tuning.hover_scale;
        let Some(item) = self.item_mut(id) else {
            return false;
        };
        match (item.hovered, hovering) {
            (false, true) => {
                item.hovered = true;
                item.target_scale = Vec3::splat(hover_scale);
                if item.hover_spin_target.is_none() {
                    item.hover_spin_target = Some(wrap_angle(view_angle));
                }
                true
            }
            (true, false) => {
                item.hovered = false;
                item.target_scale = Vec3::ONE;
                item.hover_spin_target = None;
                // Resume idling from wherever the item is now facing.
                item.base_spin = wrap_angle(item.rotation);
                false
            }
            _ => false,
        }
    }

    /// Check the item at ring position 0 against the last recorded front
    /// item. Returns it exactly once per front transition.
    pub fn resolve_activation(&mut self) -> Option<ItemId> {
        let front = self.ring.front().id;
        if self.front == Some(front) {
            return None;
        }
        self.front = Some(front);
        Some(front)
    }

    /// The item's navigation target, unclassified.
    pub fn destination(&self, id: ItemId) -> Option<&str> {
        self.item(id).map(|item| item.destination.as_str())
    }

    // ── Per-frame step ──────────────────────────────────────────────────

    /// Advance every animated value by one frame, then resolve the front
    /// item. Returns the item that just became front-most, if any.
    pub fn advance(&mut self) -> Option<ItemId> {
        let tuning = &self.tuning;
        self.current_angle = approach(
            self.current_angle,
            self.target_angle,
            tuning.angle_smoothing,
        );
        self.elapsed += tuning.time_step;

        for item in self.ring.storage_mut() {
            item.current_scale = approach_vec3(
                item.current_scale,
                item.target_scale,
                tuning.scale_smoothing,
            );
            item.base_spin = wrap_angle(item.base_spin + tuning.spin_step);
            item.rotation = match item.hover_spin_target {
                Some(target) => approach_angle(
                    item.rotation,
                    target,
                    tuning.hover_spin_smoothing,
                ),
                None => item.base_spin,
            };
        }

        self.resolve_activation()
    }

    /// Transforms for every item in ring order, front first.
    pub fn placements(&self) -> Vec<Placement> {
        let layout = self.layout();
        self.ring
            .iter()
            .enumerate()
            .map(|(slot, item)| Placement {
                id: item.id,
                slot,
                position: layout.position(slot),
                rotation: item.rotation,
                scale: item.current_scale,
                hovered: item.hovered,
            })
            .collect()
    }

    /// Ring geometry for the current frame.
    pub fn layout(&self) -> RingLayout {
        RingLayout {
            angle: self.current_angle,
            len: self.ring.len(),
            elapsed: self.elapsed,
            radius: self.tuning.radius,
            float_amplitude: self.tuning.float_amplitude,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Look up an item by identity.
    pub fn item(&self, id: ItemId) -> Option<&CarouselItem> {
        self.ring.storage().get(id.0)
    }

    fn item_mut(&mut self, id: ItemId) -> Option<&mut CarouselItem> {
        self.ring.storage_mut().get_mut(id.0)
    }

    /// Items in ring order, front first.
    pub fn items(&self) -> impl Iterator<Item = &CarouselItem> + '_ {
        self.ring.iter()
    }

    /// The item at ring position 0.
    pub fn front_item(&self) -> &CarouselItem {
        self.ring.front()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Always `false`: construction rejects empty rings.
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Animated ring angle.
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    /// Ring angle the animation is heading toward.
    pub fn target_angle(&self) -> f32 {
        self.target_angle
    }

    /// Elapsed animation time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Motion tuning in effect.
    pub fn tuning(&self) -> &CarouselOptions {
        &self.tuning
    }

    /// Replace the motion tuning. Targets and ring order are kept.
    pub fn set_tuning(&mut self, tuning: CarouselOptions) {
        self.tuning = tuning;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn carousel() -> Carousel {
        let items: Vec<ItemOptions> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|label| ItemOptions {
                label: (*label).to_owned(),
                destination: format!("/{}", label.to_lowercase()),
                sound: Some(format!("{label}.wav")),
            })
            .collect();
        Carousel::with_rng(
            &items,
            CarouselOptions::default(),
            &mut StdRng::seed_from_u64(7),
        )
        .unwrap()
    }

    fn order(carousel: &Carousel) -> String {
        carousel.items().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn empty_item_list_is_rejected() {
        let err = Carousel::new(&[], CarouselOptions::default()).unwrap_err();
        assert!(matches!(err, CarouselError::EmptyRing));
    }

    #[test]
    fn rotate_right_sends_front_to_back() {
        let mut c = carousel();
        c.rotate(Direction::Right);
        assert_eq!(order(&c), "BCDEA");
        assert!((c.target_angle() - TAU / 5.0).abs() < 1e-6);
    }

    #[test]
    fn rotate_left_brings_back_to_front() {
        let mut c = carousel();
        c.rotate(Direction::Left);
        assert_eq!(order(&c), "EABCD");
        assert!((c.target_angle() + TAU / 5.0).abs() < 1e-6);
    }

    #[test]
    fn rotations_always_permute() {
        let mut c = carousel();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let direction = if rng.random_bool(0.5) {
                Direction::Left
            } else {
                Direction::Right
            };
            c.rotate(direction);
            let mut ids: Vec<usize> = c.items().map(|item| item.id.0).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        }
    }

    #[test]
    fn opposite_rotations_cancel() {
        let mut c = carousel();
        for _ in 0..7 {
            c.rotate(Direction::Left);
        }
        for _ in 0..7 {
            c.rotate(Direction::Right);
        }
        assert_eq!(order(&c), "ABCDE");
        assert!(c.target_angle().abs() < 1e-5);
    }

    #[test]
    fn angle_error_decays_by_smoothing_factor() {
        let mut c = carousel();
        c.rotate(Direction::Right);
        let initial = c.target_angle() - c.current_angle();
        for n in 1..=60 {
            let _ = c.advance();
            let error = c.target_angle() - c.current_angle();
            let expected = initial * 0.95_f32.powi(n);
            assert!((error - expected).abs() < 1e-4, "frame {n}");
        }
        for _ in 0..400 {
            let _ = c.advance();
        }
        assert!((c.target_angle() - c.current_angle()).abs() < 1e-4);
    }

    #[test]
    fn hover_enter_reports_once() {
        let mut c = carousel();
        let id = ItemId(2);
        assert!(c.set_hover(id, true, 0.0));
        for _ in 0..10 {
            assert!(!c.set_hover(id, true, 0.0));
        }
        assert!(!c.set_hover(id, false, 0.0));
        assert!(c.set_hover(id, true, 0.0));
    }

    #[test]
    fn hover_sets_targets_and_leaving_restores_them() {
        let mut c = carousel();
        let id = ItemId(1);
        let _ = c.set_hover(id, true, 0.25);
        let item = c.item(id).unwrap();
        assert_eq!(item.target_scale, Vec3::splat(1.2));
        assert_eq!(item.hover_spin_target, Some(0.25));

        for _ in 0..5 {
            let _ = c.advance();
        }
        let rendered = c.item(id).unwrap().rotation;

        let _ = c.set_hover(id, false, 0.25);
        let item = c.item(id).unwrap();
        assert_eq!(item.target_scale, Vec3::ONE);
        assert_eq!(item.hover_spin_target, None);
        assert!((item.base_spin - rendered).abs() < 1e-6);
    }

    #[test]
    fn hover_keeps_first_captured_spin_target() {
        let mut c = carousel();
        let id = ItemId(0);
        let _ = c.set_hover(id, true, 0.5);
        let _ = c.set_hover(id, true, 1.5);
        assert_eq!(c.item(id).unwrap().hover_spin_target, Some(0.5));
    }

    #[test]
    fn scale_is_smoothed_not_snapped() {
        let mut c = carousel();
        let id = ItemId(0);
        let _ = c.set_hover(id, true, 0.0);
        assert_eq!(c.item(id).unwrap().current_scale, Vec3::ONE);
        let _ = c.advance();
        let scale = c.item(id).unwrap().current_scale;
        assert!((scale.x - 1.02).abs() < 1e-6);
    }

    #[test]
    fn hovered_item_turns_toward_viewer() {
        let mut c = carousel();
        let id = ItemId(3);
        let _ = c.set_hover(id, true, 0.0);
        for _ in 0..300 {
            let _ = c.advance();
        }
        let rotation = c.item(id).unwrap().rotation;
        assert!(rotation < 1e-3 || TAU - rotation < 1e-3);
    }

    #[test]
    fn hovered_item_settles_for_a_viewer_behind_negative_yaw() {
        let mut c = carousel();
        let id = ItemId(0);
        let _ = c.set_hover(id, true, -FRAC_PI_2);
        let mut previous = c.item(id).unwrap().rotation;
        let mut largest_late_step = 0.0_f32;
        for frame in 0..600 {
            let _ = c.advance();
            let rotation = c.item(id).unwrap().rotation;
            if frame >= 300 {
                let step = (rotation - previous).abs();
                largest_late_step = largest_late_step.max(step.min(TAU - step));
            }
            previous = rotation;
        }
        assert!(largest_late_step < 0.01, "still spinning: {largest_late_step}");
        assert!((previous - 3.0 * FRAC_PI_2).abs() < 1e-3);
    }

    #[test]
    fn idle_spin_advances_and_wraps() {
        let mut c = carousel();
        let before = c.item(ItemId(4)).unwrap().base_spin;
        let _ = c.advance();
        let after = c.item(ItemId(4)).unwrap();
        assert!(
            (wrap_angle(before + 0.003) - after.base_spin).abs() < 1e-6
        );
        assert_eq!(after.rotation, after.base_spin);
        assert!((0.0..TAU).contains(&after.base_spin));
    }

    #[test]
    fn activation_fires_once_per_front_transition() {
        let mut c = carousel();
        assert_eq!(c.advance(), Some(ItemId(0)));
        for _ in 0..30 {
            assert_eq!(c.advance(), None);
        }
        c.rotate(Direction::Right);
        assert_eq!(c.advance(), Some(ItemId(1)));
        assert_eq!(c.advance(), None);
        c.rotate(Direction::Left);
        assert_eq!(c.advance(), Some(ItemId(0)));
    }

    #[test]
    fn rotating_back_before_a_frame_is_not_a_transition() {
        let mut c = carousel();
        let _ = c.advance();
        c.rotate(Direction::Right);
        c.rotate(Direction::Left);
        assert_eq!(c.advance(), None);
    }

    #[test]
    fn destination_lookup_survives_rotation() {
        let mut c = carousel();
        c.rotate(Direction::Right);
        c.rotate(Direction::Right);
        assert_eq!(c.destination(ItemId(1)), Some("/b"));
        assert_eq!(c.front_item().destination, "/c");
        assert_eq!(c.destination(ItemId(9)), None);
    }

    #[test]
    fn placements_follow_ring_order() {
        let mut c = carousel();
        c.rotate(Direction::Right);
        let placements = c.placements();
        assert_eq!(placements.len(), 5);
        assert_eq!(placements[0].id, ItemId(1));
        assert_eq!(placements[0].slot, 0);
        assert_eq!(placements[4].id, ItemId(0));
    }
}
