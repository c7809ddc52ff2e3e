//! Plain-old-data GPU payloads shared by both frontends.

use crate::camera::CameraRig;
use crate::layout::{ItemPlacement, ItemStatus};
use crate::outputs::HudParams;
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use std::hash::Hasher;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub card_half: [f32; 2],
    pub time: f32,
    pub _pad: f32,
}

impl SceneUniforms {
    pub fn new(camera: &CameraRig, card_half: Vec2, time: f32) -> Self {
        Self {
            view_proj: camera.view_proj().to_cols_array_2d(),
            card_half: card_half.to_array(),
            time,
            _pad: 0.0,
        }
    }
}

/// Per-card instance data: model matrix columns, tint and
/// `[glow, status, 0, 0]`.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ItemInstance {
    pub model: [[f32; 4]; 4],
    pub tint: [f32; 4],
    pub params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct HudUniforms {
    pub resolution: [f32; 2],
    pub time: f32,
    pub speed: f32,
    pub rotation: f32,
    pub _pad: [f32; 3],
}

impl HudUniforms {
    pub fn new(hud: &HudParams, width: u32, height: u32) -> Self {
        Self {
            resolution: [width.max(1) as f32, height.max(1) as f32],
            time: hud.time,
            speed: hud.speed,
            rotation: hud.rotation,
            _pad: [0.0; 3],
        }
    }
}

fn status_code(status: ItemStatus) -> f32 {
    match status {
        ItemStatus::Idle => 0.0,
        ItemStatus::Hovered => 1.0,
        ItemStatus::Selected => 2.0,
        ItemStatus::Receded => 3.0,
    }
}

/// Stable card tint for an opaque item reference (e.g. an image URL).
pub fn item_tint(reference: &str) -> [f32; 4] {
    let mut hasher = fnv::FnvHasher::default();
    hasher.write(reference.as_bytes());
    let hue = (hasher.finish() % 360) as f32 / 360.0;
    let [r, g, b] = hsv_to_rgb(hue, 0.45, 0.9);
    [r, g, b, 1.0]
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);
    match (i as i32).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

/// Pack placements for upload, sorted back to front (ascending world z) so
/// alpha-blended cards composite correctly without a depth buffer.
///
/// `tints` is indexed by item; missing entries fall back to white.
pub fn pack_instances(placements: &[ItemPlacement], tints: &[[f32; 4]], out: &mut Vec<ItemInstance>) {
    out.clear();
    let mut order: Vec<(usize, f32)> = placements
        .iter()
        .enumerate()
        .map(|(slot, p)| (slot, p.model.w_axis.z))
        .collect();
    order.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    for (slot, _) in order {
        let p = &placements[slot];
        out.push(ItemInstance {
            model: p.model.to_cols_array_2d(),
            tint: tints.get(p.index).copied().unwrap_or([1.0; 4]),
            params: [p.glow, status_code(p.status), 0.0, 0.0],
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<HudUniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<ItemInstance>(), 96);
    }

    #[test]
    fn tint_is_stable_and_opaque() {
        let a = item_tint("photos/a.jpg");
        assert_eq!(a, item_tint("photos/a.jpg"));
        assert_eq!(a[3], 1.0);
        assert!(a[..3].iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
