//! Rigid body handle and a reference point-mass integrator
//!
//! `RigidBody` is what the force-based controller talks to. Hosts with a
//! physics engine implement it over their own body type; `PointMass` is a
//! small semi-implicit Euler body for headless runs and tests.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::pose::Pose;

/// How a submitted force/torque is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ForceMode {
    /// Continuous force, divided by mass
    #[default]
    Force,
    /// Continuous acceleration, ignores mass
    Acceleration,
    /// Instant momentum change, divided by mass
    Impulse,
    /// Instant velocity change, ignores mass
    VelocityChange,
}

/// Physics body handle injected by the host
pub trait RigidBody: Pose {
    fn velocity(&self) -> Vec3;
    fn angular_velocity(&self) -> Vec3;
    fn add_force(&mut self, force: Vec3, mode: ForceMode);
    /// Torque in world space
    fn add_torque(&mut self, torque: Vec3, mode: ForceMode);
}

/// Hook for bodies whose physics step is driven by this crate
pub trait Integrate {
    fn integrate(&mut self, dt: f32);
}

/// Reference rigid body: unit inertia, per-axis drag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointMass {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    pub mass: f32,
    /// Linear drag coefficient (1/s)
    pub drag: f32,
    /// Angular drag coefficient (1/s)
    pub angular_drag: f32,
    /// Pending linear acceleration for the next integration
    #[serde(skip)]
    acceleration: Vec3,
    /// Pending angular acceleration for the next integration
    #[serde(skip)]
    angular_acceleration: Vec3,
}

impl Default for PointMass {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            drag: 0.0,
            angular_drag: 0.05,
            acceleration: Vec3::ZERO,
            angular_acceleration: Vec3::ZERO,
        }
    }
}

impl PointMass {
    pub fn new(mass: f32) -> Self {
        Self {
            mass: mass.max(f32::EPSILON),
            ..Default::default()
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_drag(mut self, drag: f32, angular_drag: f32) -> Self {
        self.drag = drag.max(0.0);
        self.angular_drag = angular_drag.max(0.0);
        self
    }

    /// Accelerations waiting for the next `integrate`
    pub fn pending(&self) -> (Vec3, Vec3) {
        (self.acceleration, self.angular_acceleration)
    }

    fn inv_mass(&self) -> f32 {
        1.0 / self.mass.max(f32::EPSILON)
    }
}

impl Pose for PointMass {
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

impl RigidBody for PointMass {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.acceleration += force * self.inv_mass(),
            ForceMode::Acceleration => self.acceleration += force,
            ForceMode::Impulse => self.velocity += force * self.inv_mass(),
            ForceMode::VelocityChange => self.velocity += force,
        }
    }

    fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
        // Unit inertia: torque and angular acceleration coincide
        match mode {
            ForceMode::Force | ForceMode::Acceleration => self.angular_acceleration += torque,
            ForceMode::Impulse | ForceMode::VelocityChange => self.angular_velocity += torque,
        }
    }
}

impl Integrate for PointMass {
    /// Semi-implicit Euler step; clears the force accumulators
    fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity *= 1.0 / (1.0 + self.drag * dt);
        self.position += self.velocity * dt;

        self.angular_velocity += self.angular_acceleration * dt;
        self.angular_velocity *= 1.0 / (1.0 + self.angular_drag * dt);
        if self.angular_velocity.length_squared() > 0.0 {
            let rotation = Quat::from_scaled_axis(self.angular_velocity * dt);
            self.rotation = (rotation * self.rotation).normalize();
        }

        self.acceleration = Vec3::ZERO;
        self.angular_acceleration = Vec3::ZERO;
    }
}
