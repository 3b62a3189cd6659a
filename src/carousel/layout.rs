use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use super::item::ItemId;

/// Where and how one item is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Item identity.
    pub id: ItemId,
    /// Ring position (0 = front).
    pub slot: usize,
    /// World-space centre.
    pub position: Vec3,
    /// Rotation about the world Y axis, in radians.
    pub rotation: f32,
    /// Per-axis scale.
    pub scale: Vec3,
    /// Whether the pointer is over the item.
    pub hovered: bool,
}

impl Placement {
    /// Model matrix mapping the unit cube onto this placement.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            Quat::from_rotation_y(self.rotation),
            self.position,
        )
    }
}

/// Angular width of one ring slot.
#[inline]
pub fn slot_angle(ring_len: usize) -> f32 {
    TAU / ring_len as f32
}

/// Ring geometry shared by every placement in a frame.
#[derive(Debug, Clone, Copy)]
pub struct RingLayout {
    /// Animated ring angle.
    pub angle: f32,
    /// Number of items on the ring.
    pub len: usize,
    /// Elapsed animation time (drives the bob).
    pub elapsed: f32,
    /// Ring radius.
    pub radius: f32,
    /// Bob height.
    pub float_amplitude: f32,
}

impl RingLayout {
    /// Display angle of ring position `slot`.
    pub fn display_angle(&self, slot: usize) -> f32 {
        self.angle + slot as f32 * slot_angle(self.len)
    }

    /// World-space centre of ring position `slot`: on a circle in the XZ
    /// plane, bobbing along Y with a per-slot phase.
    pub fn position(&self, slot: usize) -> Vec3 {
        let theta = self.display_angle(slot);
        let bob = (self.elapsed + slot as f32).sin() * self.float_amplitude;
        Vec3::new(theta.sin() * self.radius, bob, theta.cos() * self.radius)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    fn layout(angle: f32) -> RingLayout {
        RingLayout {
            angle,
            len: 4,
            elapsed: 0.0,
            radius: 5.0,
            float_amplitude: 0.0,
        }
    }

    #[test]
    fn front_slot_faces_the_camera_at_rest() {
        let p = layout(0.0).position(0);
        assert!((p - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn slots_are_evenly_spaced() {
        let ring = layout(0.0);
        assert!((ring.display_angle(1) - FRAC_PI_2).abs() < 1e-6);
        let p = ring.position(1);
        assert!((p - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn bob_uses_elapsed_plus_slot_phase() {
        let ring = RingLayout {
            elapsed: 0.5,
            float_amplitude: 0.1,
            ..layout(0.0)
        };
        let expected = (0.5_f32 + 2.0).sin() * 0.1;
        assert!((ring.position(2).y - expected).abs() < 1e-6);
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let placement = Placement {
            id: ItemId(0),
            slot: 0,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: FRAC_PI_2,
            scale: Vec3::splat(2.0),
            hovered: false,
        };
        let corner = placement.model_matrix().transform_point3(Vec3::X);
        // X scaled to 2, rotated a quarter turn about Y onto -Z, then moved
        assert!((corner - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5);
    }
}
