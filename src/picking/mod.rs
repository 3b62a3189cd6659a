//! CPU picking: ray casts against the items' oriented boxes.
//!
//! Every item is drawn as a unit cube transformed by its
//! [`Placement`](crate::carousel::Placement). Picking inverts that
//! transform and runs a slab test in the cube's local space, so scale and
//! spin are honoured exactly.

use glam::Vec3;

use crate::carousel::{ItemId, Placement};

/// Half extent of the unit cube every item is drawn with.
const HALF_EXTENT: f32 = 0.5;

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here).
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An item intersected by a pick ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// The intersected item.
    pub id: ItemId,
    /// World-space distance from the ray origin to the entry point.
    pub distance: f32,
}

/// All items hit by `ray`, nearest first.
pub fn pick(ray: &Ray, placements: &[Placement]) -> Vec<Hit> {
    let mut hits: Vec<Hit> = placements
        .iter()
        .filter_map(|placement| {
            ray_box_intersect(ray, placement).map(|distance| Hit {
                id: placement.id,
                distance,
            })
        })
        .collect();
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}

/// The nearest item hit by `ray`, if any.
pub fn pick_nearest(ray: &Ray, placements: &[Placement]) -> Option<Hit> {
    pick(ray, placements).into_iter().next()
}

/// Distance along `ray` to the placement's box, or `None` if it misses or
/// lies entirely behind the origin.
fn ray_box_intersect(ray: &Ray, placement: &Placement) -> Option<f32> {
    let model = placement.model_matrix();
    if model.determinant().abs() <= f32::EPSILON {
        return None;
    }
    let to_local = model.inverse();
    // The local direction is deliberately left unnormalized so `t` stays a
    // world-space distance.
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(ray.direction);

    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        if d.abs() < 1e-8 {
            if o.abs() > HALF_EXTENT {
                return None;
            }
            continue;
        }
        let t1 = (-HALF_EXTENT - o) / d;
        let t2 = (HALF_EXTENT - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(t_min.max(0.0))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    fn placement(id: usize, position: Vec3) -> Placement {
        Placement {
            id: ItemId(id),
            slot: id,
            position,
            rotation: 0.0,
            scale: Vec3::ONE,
            hovered: false,
        }
    }

    fn down_negative_z(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 10.0), Vec3::NEG_Z)
    }

    #[test]
    fn ray_hits_box_face() {
        let hits = pick(&down_negative_z(0.0, 0.0), &[placement(0, Vec3::ZERO)]);
        assert_eq!(hits.len(), 1);
        assert!((hits[0].distance - 9.5).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_beside_box() {
        let hits = pick(&down_negative_z(0.6, 0.0), &[placement(0, Vec3::ZERO)]);
        assert!(hits.is_empty());
    }

    #[test]
    fn scale_grows_the_hit_area() {
        let mut big = placement(0, Vec3::ZERO);
        big.scale = Vec3::splat(1.4);
        assert!(pick_nearest(&down_negative_z(0.6, 0.0), &[big]).is_some());
    }

    #[test]
    fn rotation_is_respected() {
        // A cube turned 45° about Y reaches out to √2/2 along X.
        let mut turned = placement(0, Vec3::ZERO);
        turned.rotation = FRAC_PI_4;
        assert!(pick_nearest(&down_negative_z(0.65, 0.0), &[turned]).is_some());
        let hit = pick_nearest(&down_negative_z(0.0, 0.0), &[turned]).unwrap();
        assert!((hit.distance - (10.0 - 0.5_f32.sqrt())).abs() < 1e-4);
    }

    #[test]
    fn hits_are_sorted_nearest_first() {
        let far = placement(0, Vec3::new(0.0, 0.0, -5.0));
        let near = placement(1, Vec3::new(0.0, 0.0, 5.0));
        let hits = pick(&down_negative_z(0.0, 0.0), &[far, near]);
        assert_eq!(
            hits.iter().map(|h| h.id).collect::<Vec<_>>(),
            vec![ItemId(1), ItemId(0)]
        );
    }

    #[test]
    fn boxes_behind_the_origin_are_ignored() {
        let behind = placement(0, Vec3::new(0.0, 0.0, 20.0));
        assert!(pick(&down_negative_z(0.0, 0.0), &[behind]).is_empty());
    }

    #[test]
    fn origin_inside_box_reports_zero_distance() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let hit = pick_nearest(&ray, &[placement(0, Vec3::ZERO)]).unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn degenerate_scale_never_hits() {
        let mut flat = placement(0, Vec3::ZERO);
        flat.scale = Vec3::ZERO;
        assert!(pick(&down_negative_z(0.0, 0.0), &[flat]).is_empty());
    }
}
