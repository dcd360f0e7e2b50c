//! Transform-driven flight controller
//!
//! Keeps its own velocity and roll/pitch/yaw rates and moves the pose
//! directly each tick. No physics body involved.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::axes::{LocalAxes, accumulate_movement, accumulate_rotation};
use super::input::{Command, InputFrame};
use super::pose::Pose;
use crate::clamp_symmetric;

/// Tuning for the kinematic controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicConfig {
    /// Velocity gained per second of held movement input
    pub move_acceleration: f32,
    /// Speed lost per second while stopping
    pub stop_deceleration: f32,
    /// Rate gained per second of held rotation input (degrees/tick per second)
    pub rotate_acceleration: f32,
    /// Fraction of each rate removed per second while stopping rotation
    pub rotation_damping: f32,
    /// Velocity magnitude cap (units per tick)
    pub max_speed: f32,
    /// Speeds below this snap to zero while stopping
    pub min_speed: f32,
    /// Rates below this snap to zero while stopping rotation
    pub min_rotation_speed: f32,
    pub max_roll_speed: f32,
    pub max_pitch_speed: f32,
    pub max_yaw_speed: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        Self {
            move_acceleration: 1.0,
            stop_deceleration: 1.0,
            rotate_acceleration: 1.0,
            rotation_damping: 1.0,
            max_speed: 10.0,
            min_speed: 0.05,
            min_rotation_speed: 0.05,
            max_roll_speed: 2.0,
            max_pitch_speed: 2.0,
            max_yaw_speed: 2.0,
        }
    }
}

/// Persistent motion of the craft
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    /// World-space velocity (units per tick)
    pub velocity: Vec3,
}

impl MotionState {
    pub fn is_at_rest(&self) -> bool {
        self.roll == 0.0 && self.pitch == 0.0 && self.yaw == 0.0 && self.velocity == Vec3::ZERO
    }
}

/// What one tick does to the pose
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionDelta {
    pub translation: Vec3,
    /// Degrees about local forward
    pub roll: f32,
    /// Degrees about local right
    pub pitch: f32,
    /// Degrees about local up
    pub yaw: f32,
}

impl MotionDelta {
    /// Translate, then roll, pitch and yaw as three separate local rotations.
    ///
    /// The order is fixed: each rotation sees the axes left by the previous
    /// one, so this is not equivalent to a single combined rotation.
    pub fn apply_to<P: Pose + ?Sized>(&self, pose: &mut P) {
        pose.translate(self.translation);
        pose.rotate_local(Vec3::Z, self.roll);
        pose.rotate_local(Vec3::X, self.pitch);
        pose.rotate_local(Vec3::Y, self.yaw);
    }
}

/// Scale `rate` toward zero by `damping * dt` (never past zero), snapping
/// small results to exactly zero.
pub fn decay_rate(rate: f32, damping: f32, dt: f32, min: f32) -> f32 {
    let factor = (damping * dt).clamp(0.0, 1.0);
    let next = rate - rate * factor;
    if next.abs() < min { 0.0 } else { next }
}

/// Shrink `velocity` by `deceleration * dt` along its current direction
/// (never past zero), snapping small results to zero. Zero stays zero.
pub fn decay_velocity(velocity: Vec3, deceleration: f32, dt: f32, min: f32) -> Vec3 {
    let speed = velocity.length();
    if speed == 0.0 {
        return Vec3::ZERO;
    }
    let drop = (deceleration * dt).clamp(0.0, speed);
    let next = velocity - velocity / speed * drop;
    if next.length() < min { Vec3::ZERO } else { next }
}

/// Kinematic flight controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinematicController {
    pub config: KinematicConfig,
    pub state: MotionState,
}

impl KinematicController {
    pub fn new(config: KinematicConfig) -> Self {
        Self {
            config,
            state: MotionState::default(),
        }
    }

    /// Advance motion by one tick and return the pose change.
    ///
    /// `axes` are the craft's local axes at the start of the tick.
    pub fn step(&mut self, frame: &InputFrame, dt: f32, axes: &LocalAxes) -> MotionDelta {
        let cfg = &self.config;
        let state = &mut self.state;

        // Rotation rates
        if frame.is_set(Command::StopRotation) {
            let min = cfg.min_rotation_speed;
            state.pitch = decay_rate(state.pitch, cfg.rotation_damping, dt, min);
            state.yaw = decay_rate(state.yaw, cfg.rotation_damping, dt, min);
            state.roll = decay_rate(state.roll, cfg.rotation_damping, dt, min);
            log::trace!("stop rotation: rates now {:?}", (state.roll, state.pitch, state.yaw));
        } else {
            let delta = accumulate_rotation(frame, cfg.rotate_acceleration * dt);
            state.roll += delta.x;
            state.pitch += delta.y;
            state.yaw += delta.z;
        }

        // Linear velocity
        if frame.is_set(Command::StopMovement) {
            state.velocity = decay_velocity(state.velocity, cfg.stop_deceleration, dt, cfg.min_speed);
            if state.velocity == Vec3::ZERO {
                log::trace!("stop movement: at rest");
            }
        } else {
            state.velocity += accumulate_movement(frame, axes, cfg.move_acceleration * dt, 1.0);
        }

        // Caps
        state.velocity = state.velocity.clamp_length_max(cfg.max_speed.abs());
        state.roll = clamp_symmetric(state.roll, cfg.max_roll_speed);
        state.pitch = clamp_symmetric(state.pitch, cfg.max_pitch_speed);
        state.yaw = clamp_symmetric(state.yaw, cfg.max_yaw_speed);

        MotionDelta {
            translation: state.velocity,
            roll: state.roll,
            pitch: state.pitch,
            yaw: state.yaw,
        }
    }

    /// Step using the pose's axes, then move the pose
    pub fn tick<P: Pose + ?Sized>(&mut self, frame: &InputFrame, dt: f32, pose: &mut P) -> MotionDelta {
        let delta = self.step(frame, dt, &pose.axes());
        delta.apply_to(pose);
        delta
    }

    /// Zero all rates and velocity, keeping the tuning
    pub fn reset(&mut self) {
        self.state = MotionState::default();
    }
}
