//! Ring layout: scroll offset + item count -> per-item angle and placement.
//!
//! Items sit on a horizontal ring of radius `R` whose front point is the
//! origin, so the front-most item is at `z = 0` and the rest curve away from
//! the camera. An item at angle `a` is placed at `(R sin a, 0, R cos a - R)`
//! and rotated by `a` about Y so it faces outward.

use crate::config::{LayoutConfig, ScaleDepth};
use crate::smoothing::approach;
use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[inline]
pub fn angle_step(count: usize) -> Option<f32> {
    (count > 0).then(|| TAU / count as f32)
}

/// Unwrapped angle of item `index`; `0` is the front of the ring.
#[inline]
pub fn item_angle(index: usize, step: f32, scroll: f32) -> f32 {
    index as f32 * step - scroll
}

/// Wrap into `(-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let a = (angle + PI).rem_euclid(TAU) - PI;
    if a <= -PI {
        a + TAU
    } else {
        a
    }
}

/// Index of the front-most item for a given scroll offset.
///
/// Equivalent to picking the item with the smallest wrapped `|angle|`. At an
/// exact half-step boundary both neighbours are equally far; the tie goes to
/// the higher index (the next item in scroll direction), so
/// `scroll = step / 2` selects item 1 and `scroll = -step / 2` selects item 0.
pub fn active_index(count: usize, scroll: f32) -> Option<usize> {
    let step = angle_step(count)?;
    let slot = (scroll / step + 0.5).floor() as i64;
    Some(slot.rem_euclid(count as i64) as usize)
}

#[inline]
pub fn ring_position(angle: f32, radius: f32) -> Vec3 {
    Vec3::new(radius * angle.sin(), 0.0, radius * angle.cos() - radius)
}

/// Rotation applied to the whole ring from the smoothed tilt.
#[inline]
pub fn scene_rotation(pitch: f32, roll: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, pitch, 0.0, roll)
}

/// Per-item display state, evaluated in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    Selected,
    Receded,
    Hovered,
    Idle,
}

impl ItemStatus {
    pub fn resolve(index: usize, selected: Option<usize>, hovered: Option<usize>) -> Self {
        match selected {
            Some(s) if s == index => Self::Selected,
            Some(_) => Self::Receded,
            None if hovered == Some(index) => Self::Hovered,
            None => Self::Idle,
        }
    }

    pub fn targets(self, cfg: &LayoutConfig) -> ItemTargets {
        let ScaleDepth { scale, z } = match self {
            Self::Selected => cfg.selected,
            Self::Receded => cfg.receded,
            Self::Hovered => cfg.hovered,
            Self::Idle => cfg.idle,
        };
        ItemTargets {
            scale,
            z_offset: z,
            glow: if self == Self::Hovered { 1.0 } else { 0.0 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemTargets {
    pub scale: f32,
    pub z_offset: f32,
    pub glow: f32,
}

/// Smoothed per-item animation values, parallel to the item list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemAnim {
    pub scale: f32,
    pub z_offset: f32,
    pub glow: f32,
}

impl ItemAnim {
    pub const NEUTRAL: Self = Self {
        scale: 1.0,
        z_offset: 0.0,
        glow: 0.0,
    };

    pub fn step(&mut self, t: &ItemTargets, item_alpha: f32, glow_alpha: f32) {
        self.scale = approach(self.scale, t.scale, item_alpha);
        self.z_offset = approach(self.z_offset, t.z_offset, item_alpha);
        self.glow = approach(self.glow, t.glow, glow_alpha);
    }
}

impl Default for ItemAnim {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Where one item is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    pub index: usize,
    /// Wrapped angle on the ring.
    pub angle: f32,
    /// Ring-local position including the smoothed depth offset.
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    pub glow: f32,
    pub status: ItemStatus,
    /// World transform of the unit card (ring tilt * translate * rotate * scale).
    pub model: Mat4,
}

/// Lay out every item for the current scroll offset and scene tilt.
///
/// `out` is cleared and refilled; nothing is produced for an empty ring.
pub fn place_items(
    anims: &[ItemAnim],
    statuses: impl Fn(usize) -> ItemStatus,
    scroll: f32,
    tilt: Quat,
    cfg: &LayoutConfig,
    out: &mut Vec<ItemPlacement>,
) {
    out.clear();
    let Some(step) = angle_step(anims.len()) else {
        return;
    };
    let ring = Mat4::from_quat(tilt);
    for (i, anim) in anims.iter().enumerate() {
        let angle = item_angle(i, step, scroll);
        let mut position = ring_position(angle, cfg.radius);
        position.z += anim.z_offset;
        let local = Mat4::from_scale_rotation_translation(
            Vec3::new(anim.scale, anim.scale, 1.0),
            Quat::from_rotation_y(angle),
            position,
        );
        out.push(ItemPlacement {
            index: i,
            angle: wrap_angle(angle),
            position,
            rotation_y: angle,
            scale: anim.scale,
            glow: anim.glow,
            status: statuses(i),
            model: ring * local,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_angle_range() {
        assert!((wrap_angle(PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-6);
        assert!((wrap_angle(3.0 * TAU + 0.25) - 0.25).abs() < 1e-4);
        assert!((wrap_angle(-0.25) + 0.25).abs() < 1e-6);
    }

    #[test]
    fn front_item_sits_at_origin() {
        let p = ring_position(0.0, 6.0);
        assert!(p.length() < 1e-6);
        let side = ring_position(std::f32::consts::FRAC_PI_2, 6.0);
        assert!((side - Vec3::new(6.0, 0.0, -6.0)).length() < 1e-5);
    }

    #[test]
    fn status_priority() {
        assert_eq!(ItemStatus::resolve(2, Some(2), Some(2)), ItemStatus::Selected);
        assert_eq!(ItemStatus::resolve(1, Some(2), Some(1)), ItemStatus::Receded);
        assert_eq!(ItemStatus::resolve(1, None, Some(1)), ItemStatus::Hovered);
        assert_eq!(ItemStatus::resolve(0, None, Some(1)), ItemStatus::Idle);
    }

    #[test]
    fn empty_ring_has_no_step() {
        assert_eq!(angle_step(0), None);
        assert_eq!(active_index(0, 1.0), None);
    }
}
