//! Hover hit-testing of the cursor ray against the laid-out cards.

use crate::camera::Ray;
use crate::layout::ItemPlacement;
use glam::{Mat4, Vec2};

const PARALLEL_EPSILON: f32 = 1e-6;

/// Distance along `ray` to a card drawn with `model`, or `None` on a miss.
///
/// The card is the rectangle `|x| <= half.x, |y| <= half.y` on the local
/// `z = 0` plane; both faces count. `ray.dir` is expected to be normalized so
/// the result is a world-space distance.
pub fn ray_card(ray: &Ray, model: &Mat4, half: Vec2) -> Option<f32> {
    let inv = model.inverse();
    if !inv.is_finite() {
        return None;
    }
    let o = inv.transform_point3(ray.origin);
    let d = inv.transform_vector3(ray.dir);
    if d.z.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = -o.z / d.z;
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    (p.x.abs() <= half.x && p.y.abs() <= half.y).then_some(t)
}

/// The card nearest along the ray, if any.
///
/// Overlapping cards resolve to the smallest ray distance (the one closest to
/// the camera); an exact distance tie keeps the lower index.
pub fn pick(ray: &Ray, placements: &[ItemPlacement], half: Vec2) -> Option<usize> {
    let mut best = None::<(usize, f32)>;
    for p in placements {
        if let Some(t) = ray_card(ray, &p.model, half) {
            match best {
                Some((bi, bt)) if t > bt || (t == bt && p.index > bi) => {}
                _ => best = Some((p.index, t)),
            }
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ItemStatus;
    use glam::{Quat, Vec3};

    fn card_at(index: usize, z: f32) -> ItemPlacement {
        let position = Vec3::new(0.0, 0.0, z);
        ItemPlacement {
            index,
            angle: 0.0,
            position,
            rotation_y: 0.0,
            scale: 1.0,
            glow: 0.0,
            status: ItemStatus::Idle,
            model: Mat4::from_translation(position),
        }
    }

    fn straight_ray() -> Ray {
        Ray {
            origin: Vec3::new(0.0, 0.0, 10.0),
            dir: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[test]
    fn hits_facing_card() {
        let m = Mat4::IDENTITY;
        let t = ray_card(&straight_ray(), &m, Vec2::new(1.0, 1.0));
        assert!((t.unwrap() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn misses_edge_on_card() {
        let m = Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert_eq!(ray_card(&straight_ray(), &m, Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn ignores_cards_behind_origin() {
        let m = Mat4::from_translation(Vec3::new(0.0, 0.0, 20.0));
        assert_eq!(ray_card(&straight_ray(), &m, Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn scale_grows_the_hit_area() {
        let ray = Ray {
            origin: Vec3::new(1.5, 0.0, 10.0),
            dir: Vec3::new(0.0, 0.0, -1.0),
        };
        let half = Vec2::new(1.0, 1.0);
        assert_eq!(ray_card(&ray, &Mat4::IDENTITY, half), None);
        let scaled = Mat4::from_scale(Vec3::new(2.0, 2.0, 1.0));
        assert!(ray_card(&ray, &scaled, half).is_some());
    }

    #[test]
    fn nearest_stacked_card_wins() {
        let cards = [card_at(0, -3.0), card_at(1, 2.0), card_at(2, 0.0)];
        let half = Vec2::new(1.0, 1.0);
        assert_eq!(pick(&straight_ray(), &cards, half), Some(1));

        let reversed = [card_at(2, 0.0), card_at(1, 2.0), card_at(0, -3.0)];
        assert_eq!(pick(&straight_ray(), &reversed, half), Some(1));
    }

    #[test]
    fn equal_distance_keeps_lower_index() {
        let half = Vec2::new(1.0, 1.0);
        let cards = [card_at(4, 1.0), card_at(2, 1.0), card_at(7, -1.0)];
        assert_eq!(pick(&straight_ray(), &cards, half), Some(2));
    }

    #[test]
    fn empty_ring_picks_nothing() {
        assert_eq!(pick(&straight_ray(), &[], Vec2::ONE), None);
    }
}
