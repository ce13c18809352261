//! Slow rigid spin of the whole point cloud.

use glam::Mat4;

/// Default spin rate in radians per second.
pub const DEFAULT_ROTATION_SPEED: f32 = 0.05;

/// Rotation angle of the galaxy about its vertical axis.
///
/// The angle only grows: each frame adds `delta * speed`, and deltas that are
/// negative or not finite add nothing. Applying it is one matrix for the whole
/// cloud, so the cost per frame does not depend on the particle count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    angle: f32,
    speed: f32,
}

impl RotationState {
    /// Start at angle zero. Negative speeds are clamped to zero.
    pub fn new(speed: f32) -> Self {
        Self {
            angle: 0.0,
            speed: if speed.is_finite() { speed.max(0.0) } else { 0.0 },
        }
    }

    /// Advance by one frame and return the new angle.
    pub fn advance(&mut self, delta: f32) -> f32 {
        if delta.is_finite() && delta > 0.0 {
            self.angle += delta * self.speed;
        }
        self.angle
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Model matrix for the current angle.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.angle)
    }

    pub fn reset(&mut self) {
        self.angle = 0.0;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new(DEFAULT_ROTATION_SPEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_is_sum_of_increments() {
        let mut rotation = RotationState::new(0.5);
        let deltas = [0.016, 0.017, 0.5, 0.0, 1.0];
        let mut expected = 0.0;
        let mut last = 0.0;
        for d in deltas {
            expected += d * 0.5;
            let angle = rotation.advance(d);
            assert!(angle >= last);
            last = angle;
        }
        assert!((rotation.angle() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bad_deltas_ignored() {
        let mut rotation = RotationState::default();
        rotation.advance(1.0);
        let before = rotation.angle();
        rotation.advance(-3.0);
        rotation.advance(f32::NAN);
        rotation.advance(f32::INFINITY);
        assert_eq!(rotation.angle(), before);
    }

    #[test]
    fn test_negative_speed_clamped() {
        let mut rotation = RotationState::new(-1.0);
        assert_eq!(rotation.speed(), 0.0);
        assert_eq!(rotation.advance(10.0), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut rotation = RotationState::new(1.0);
        rotation.advance(2.0);
        rotation.reset();
        assert_eq!(rotation.angle(), 0.0);
        assert_eq!(rotation.matrix(), Mat4::IDENTITY);
    }
}
