//! Pose handle abstraction
//!
//! The host owns the craft's transform; controllers only see it through
//! `Pose`. Local axes follow the usual engine convention: forward = +Z,
//! right = +X, up = +Y.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::axes::LocalAxes;

/// Position/orientation handle injected by the host
pub trait Pose {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    /// Current local forward/right/up in world space
    fn axes(&self) -> LocalAxes {
        let rotation = self.rotation();
        LocalAxes {
            forward: rotation * Vec3::Z,
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
        }
    }

    /// Incremental rotation about a local-space axis (degrees)
    fn rotate_local(&mut self, axis: Vec3, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        let delta = Quat::from_axis_angle(axis, degrees.to_radians());
        self.set_rotation((self.rotation() * delta).normalize());
    }

    fn translate(&mut self, delta: Vec3) {
        self.set_position(self.position() + delta);
    }
}

/// Plain transform for hosts without their own scene graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Pose for Transform {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_identity_axes() {
        let t = Transform::default();
        let axes = t.axes();
        assert_eq!(axes.forward, Vec3::Z);
        assert_eq!(axes.right, Vec3::X);
        assert_eq!(axes.up, Vec3::Y);
    }

    #[test]
    fn test_rotate_local_uses_local_axis() {
        let mut t = Transform::default();
        // Yaw 90 degrees about local up
        t.rotate_local(Vec3::Y, 90.0);
        assert!(approx(t.axes().forward, Vec3::X));

        // Now pitch about the (rotated) local right axis
        t.rotate_local(Vec3::X, 90.0);
        assert!(approx(t.axes().forward, Vec3::NEG_Y));
    }

    #[test]
    fn test_zero_rotation_is_noop() {
        let mut t = Transform::default();
        t.rotate_local(Vec3::Z, 0.0);
        assert_eq!(t.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_translate() {
        let mut t = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));
        t.translate(Vec3::ONE);
        assert_eq!(t.position, Vec3::new(2.0, 3.0, 4.0));
    }
}
