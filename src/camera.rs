//! Orbit camera for viewing the galaxy.
//!
//! Yaw and panning are unrestricted. Zoom distance is clamped to the
//! configured `[min_distance, max_distance]` range. Pitch stops just short of
//! the poles so `look_at` keeps a valid up vector.

use glam::{Mat4, Vec3};

use crate::error::ParamError;

/// Vertical field of view in degrees.
pub const FOV_DEGREES: f32 = 75.0;
const NEAR: f32 = 0.1;
/// Depth kept beyond the farthest zoom so the whole disc stays in view.
const FAR_MARGIN: f32 = 100.0;
const PITCH_LIMIT: f32 = 1.55;
const ZOOM_STEP: f32 = 0.95;
const PAN_SPEED: f32 = 0.0015;

/// Orbit camera with bounded zoom.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    distance: f32,
    min_distance: f32,
    max_distance: f32,
    /// Spin the view around the target without input. Off by default.
    pub auto_rotate: bool,
    /// Auto-rotation rate in radians per second.
    pub auto_rotate_speed: f32,
}

impl OrbitCamera {
    /// Camera looking at the origin from slightly above the disc.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.45,
            target: Vec3::ZERO,
            distance: 6.0,
            min_distance: 1.0,
            max_distance: 20.0,
            auto_rotate: false,
            auto_rotate_speed: 0.5,
        }
    }

    /// Set the zoom range; the current distance is pulled inside it.
    pub fn with_limits(mut self, min: f32, max: f32) -> Result<Self, ParamError> {
        crate::params::positive("min_distance", min)?;
        crate::params::positive("max_distance", max)?;
        if min > max {
            return Err(ParamError::CameraRange { min, max });
        }
        self.min_distance = min;
        self.max_distance = max;
        self.distance = self.distance.clamp(min, max);
        Ok(self)
    }

    /// Set the distance, clamped to the zoom range.
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.set_distance(distance);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self
    }

    #[inline]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    #[inline]
    pub fn limits(&self) -> (f32, f32) {
        (self.min_distance, self.max_distance)
    }

    pub fn set_distance(&mut self, distance: f32) {
        if distance.is_finite() {
            self.distance = distance.clamp(self.min_distance, self.max_distance);
        }
    }

    /// Orbit around the target by the given angles in radians.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Dolly towards (positive) or away from (negative) the target.
    ///
    /// Each step scales the distance by a constant factor, so zooming feels
    /// the same near and far.
    pub fn zoom(&mut self, steps: f32) {
        self.set_distance(self.distance * ZOOM_STEP.powf(steps));
    }

    /// Slide the target in the view plane. Inputs are in pixels.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let (right, up) = self.screen_axes();
        let scale = self.distance * PAN_SPEED;
        self.target += (-right * dx + up * dy) * scale;
    }

    /// Per-frame update; only does anything when auto-rotation is enabled.
    pub fn update(&mut self, delta: f32) {
        if self.auto_rotate && delta.is_finite() && delta > 0.0 {
            self.yaw += self.auto_rotate_speed * delta;
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Perspective projection for the given aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh(FOV_DEGREES.to_radians(), aspect, NEAR, self.far())
    }

    /// Far clip distance: the farthest the origin can be from the camera,
    /// plus a margin.
    pub fn far(&self) -> f32 {
        let target = self.target.length();
        let reach = if target.is_finite() { self.max_distance + target } else { self.max_distance };
        reach + FAR_MARGIN
    }

    fn screen_axes(&self) -> (Vec3, Vec3) {
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (right, up)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new()
    }
}
