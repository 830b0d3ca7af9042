//! Orbit camera shared by front-ends.
//!
//! Platform-agnostic: the native shell feeds it drag deltas and wheel steps
//! and reads back view/projection matrices.

use crate::constants::{CAMERA_FOV_DEG, CAMERA_MAX_DISTANCE, CAMERA_MIN_DISTANCE, CAMERA_POSITION};
use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 1.45; // just short of straight up/down
const DRAG_RADIANS_PER_PX: f32 = 0.005;
const ZOOM_PER_STEP: f32 = 0.08;

/// Right-handed perspective camera orbiting a target point.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(CAMERA_POSITION)
    }
}

impl OrbitCamera {
    /// Camera placed at `eye`, looking at the origin.
    pub fn looking_from(eye: Vec3) -> Self {
        let distance = eye.length().clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let pitch = (eye.y / eye.length().max(1e-6)).asin();
        let yaw = eye.x.atan2(eye.z);
        Self {
            target: Vec3::ZERO,
            distance,
            yaw,
            pitch,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: 0.1,
            zfar: 400.0,
        }
    }

    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.pitch.cos();
        self.target
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.distance * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Orbit by a pointer drag measured in pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * DRAG_RADIANS_PER_PX;
        self.pitch = (self.pitch + dy * DRAG_RADIANS_PER_PX).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Zoom by wheel steps; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 - ZOOM_PER_STEP).powf(steps);
        self.distance = (self.distance * factor).clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_eye_matches_configured_position() {
        let cam = OrbitCamera::default();
        assert!((cam.eye() - CAMERA_POSITION).length() < 1e-3);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = OrbitCamera::default();
        cam.zoom(100.0);
        assert_eq!(cam.distance, CAMERA_MIN_DISTANCE);
        cam.zoom(-100.0);
        assert_eq!(cam.distance, CAMERA_MAX_DISTANCE);
    }

    #[test]
    fn drag_never_flips_over_the_pole() {
        let mut cam = OrbitCamera::default();
        cam.drag(0.0, 10_000.0);
        assert!(cam.pitch <= PITCH_LIMIT);
        assert!(cam.view_matrix().is_finite());
    }
}
