//! Camera description and cursor-to-world picking rays.
//!
//! These types avoid platform-specific APIs so both frontends (and tests)
//! build identical view matrices and rays.

use crate::config::CameraConfig;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Right-handed perspective camera looking down -Z at the ring's front item.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl CameraRig {
    pub fn from_config(cfg: &CameraConfig, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, cfg.distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: cfg.fovy_degrees.to_radians(),
            znear: cfg.znear,
            zfar: cfg.zfar,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = sanitize_aspect(aspect);
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a normalized cursor position (`y` grows
    /// downward, matching image coordinates).
    pub fn ray_through(&self, uv: Vec2) -> Ray {
        let ndc_x = 2.0 * uv.x - 1.0;
        let ndc_y = 1.0 - 2.0 * uv.y;
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Ray {
            origin: self.eye,
            dir: (p1 - self.eye).normalize(),
        }
    }
}

#[inline]
fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}
