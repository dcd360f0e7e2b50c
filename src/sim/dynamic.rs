//! Force-based flight controller
//!
//! Turns held commands into one tick's force and torque, hands them to the
//! rigid body, and forgets them. The body's integrator owns velocity.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::axes::{accumulate_movement, accumulate_rotation};
use super::body::{ForceMode, RigidBody};
use super::input::InputFrame;
use crate::clamp_symmetric;

/// Tuning for the force-based controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicConfig {
    /// Thrust per unit of held movement input
    pub move_acceleration: f32,
    /// Extra multiplier on forward thrust
    pub forward_multiplier: f32,
    /// Torque per unit of held rotation input
    pub rotate_acceleration: f32,
    /// Linear impulse magnitude cap
    pub max_force: f32,
    pub max_roll_torque: f32,
    pub max_pitch_torque: f32,
    pub max_yaw_torque: f32,
}

impl Default for DynamicConfig {
    fn default() -> Self {
        Self {
            move_acceleration: 500.0,
            forward_multiplier: 2.0,
            rotate_acceleration: 100.0,
            max_force: 30.0,
            max_roll_torque: 4.0,
            max_pitch_torque: 4.0,
            max_yaw_torque: 4.0,
        }
    }
}

/// One tick's worth of force and torque
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceState {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub force: Vec3,
}

impl ForceState {
    pub const ZERO: ForceState = ForceState {
        roll: 0.0,
        pitch: 0.0,
        yaw: 0.0,
        force: Vec3::ZERO,
    };

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Force-based flight controller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicController {
    pub config: DynamicConfig,
    /// Impulse being built this tick; zero outside `step`
    #[serde(skip)]
    impulse: ForceState,
}

impl DynamicController {
    pub fn new(config: DynamicConfig) -> Self {
        Self {
            config,
            impulse: ForceState::ZERO,
        }
    }

    /// Pending impulse (always zero between ticks)
    pub fn impulse(&self) -> &ForceState {
        &self.impulse
    }

    /// Build, clamp and submit this tick's impulse. Stop commands have no
    /// effect here. Returns what was submitted.
    pub fn step<B: RigidBody + ?Sized>(&mut self, frame: &InputFrame, dt: f32, body: &mut B) -> ForceState {
        let cfg = &self.config;
        let axes = body.axes();

        let rotation = accumulate_rotation(frame, cfg.rotate_acceleration * dt);
        self.impulse.roll += rotation.x;
        self.impulse.pitch += rotation.y;
        self.impulse.yaw += rotation.z;
        self.impulse.force += accumulate_movement(
            frame,
            &axes,
            cfg.move_acceleration * dt,
            cfg.forward_multiplier,
        );

        self.impulse.force = self.impulse.force.clamp_length_max(cfg.max_force.abs());
        self.impulse.roll = clamp_symmetric(self.impulse.roll, cfg.max_roll_torque);
        self.impulse.pitch = clamp_symmetric(self.impulse.pitch, cfg.max_pitch_torque);
        self.impulse.yaw = clamp_symmetric(self.impulse.yaw, cfg.max_yaw_torque);

        let submitted = self.impulse;
        body.add_force(submitted.force, ForceMode::Acceleration);
        body.add_torque(axes.forward * submitted.roll, ForceMode::Acceleration);
        body.add_torque(axes.right * submitted.pitch, ForceMode::Acceleration);
        body.add_torque(axes.up * submitted.yaw, ForceMode::Acceleration);

        self.impulse = ForceState::ZERO;
        submitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::{Integrate, PointMass};
    use crate::sim::input::Command;
    use crate::sim::pose::{Pose, Transform};
    use glam::Quat;

    /// Records every submission instead of integrating
    #[derive(Default)]
    struct RecordingBody {
        pose: Transform,
        forces: Vec<(Vec3, ForceMode)>,
        torques: Vec<(Vec3, ForceMode)>,
    }

    impl Pose for RecordingBody {
        fn position(&self) -> Vec3 {
            self.pose.position
        }
        fn set_position(&mut self, position: Vec3) {
            self.pose.position = position;
        }
        fn rotation(&self) -> Quat {
            self.pose.rotation
        }
        fn set_rotation(&mut self, rotation: Quat) {
            self.pose.rotation = rotation;
        }
    }

    impl RigidBody for RecordingBody {
        fn velocity(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn angular_velocity(&self) -> Vec3 {
            Vec3::ZERO
        }
        fn add_force(&mut self, force: Vec3, mode: ForceMode) {
            self.forces.push((force, mode));
        }
        fn add_torque(&mut self, torque: Vec3, mode: ForceMode) {
            self.torques.push((torque, mode));
        }
    }

    fn unit_config() -> DynamicConfig {
        DynamicConfig {
            move_acceleration: 1.0,
            forward_multiplier: 1.0,
            rotate_acceleration: 1.0,
            max_force: 100.0,
            max_roll_torque: 100.0,
            max_pitch_torque: 100.0,
            max_yaw_torque: 100.0,
        }
    }

    #[test]
    fn test_roll_left_right_cancel() {
        let mut ctrl = DynamicController::new(unit_config());
        let mut body = RecordingBody::default();
        let frame = InputFrame::from_commands(&[Command::RollLeft, Command::RollRight]);
        let submitted = ctrl.step(&frame, 0.02, &mut body);
        assert_eq!(submitted.roll, 0.0);
        assert!(body.torques.iter().all(|(t, _)| *t == Vec3::ZERO));
    }

    #[test]
    fn test_impulse_zero_before_and_after() {
        let mut ctrl = DynamicController::new(unit_config());
        let mut body = RecordingBody::default();
        let frame = InputFrame::from_commands(&[Command::MoveForward, Command::YawRight]);
        assert!(ctrl.impulse().is_zero());
        for _ in 0..5 {
            let submitted = ctrl.step(&frame, 0.5, &mut body);
            assert!(ctrl.impulse().is_zero());
            // No leakage: every tick submits the same fresh impulse
            assert_eq!(submitted.force, Vec3::new(0.0, 0.0, 0.5));
            assert_eq!(submitted.yaw, 0.5);
        }
    }

    #[test]
    fn test_submission_modes_and_axes() {
        let mut ctrl = DynamicController::new(unit_config());
        let mut body = RecordingBody::default();
        let frame = InputFrame::from_commands(&[Command::RollLeft, Command::PitchDown, Command::YawRight]);
        ctrl.step(&frame, 1.0, &mut body);

        assert_eq!(body.forces, vec![(Vec3::ZERO, ForceMode::Acceleration)]);
        assert_eq!(
            body.torques,
            vec![
                (Vec3::Z, ForceMode::Acceleration),
                (Vec3::X, ForceMode::Acceleration),
                (Vec3::Y, ForceMode::Acceleration),
            ]
        );
    }

    #[test]
    fn test_forward_multiplier() {
        let mut ctrl = DynamicController::new(DynamicConfig {
            forward_multiplier: 3.0,
            ..unit_config()
        });
        let mut body = RecordingBody::default();
        let forward = ctrl.step(&InputFrame::from_commands(&[Command::MoveForward]), 1.0, &mut body);
        assert_eq!(forward.force, Vec3::new(0.0, 0.0, 3.0));

        let up = ctrl.step(&InputFrame::from_commands(&[Command::MoveUp]), 1.0, &mut body);
        assert_eq!(up.force, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_clamped_to_caps() {
        let mut ctrl = DynamicController::new(DynamicConfig {
            max_force: 2.0,
            max_pitch_torque: 0.25,
            ..unit_config()
        });
        let mut body = RecordingBody::default();
        let frame = InputFrame::from_commands(&[Command::MoveRight, Command::PitchUp]);
        let submitted = ctrl.step(&frame, 10.0, &mut body);
        assert!((submitted.force.length() - 2.0).abs() < 1e-5);
        assert_eq!(submitted.pitch, -0.25);
    }

    #[test]
    fn test_stop_commands_ignored() {
        let mut ctrl = DynamicController::new(unit_config());
        let mut body = RecordingBody::default();
        let frame = InputFrame::from_commands(&[Command::StopMovement, Command::StopRotation, Command::MoveLeft]);
        let submitted = ctrl.step(&frame, 1.0, &mut body);
        assert_eq!(submitted.force, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_body_keeps_velocity_after_input_released() {
        let mut ctrl = DynamicController::new(unit_config());
        let mut body = PointMass::default();
        ctrl.step(&InputFrame::from_commands(&[Command::MoveForward]), 1.0, &mut body);
        body.integrate(1.0);
        let v = body.velocity();
        assert!(v.z > 0.0);

        // No input: nothing submitted, body coasts on
        let submitted = ctrl.step(&InputFrame::EMPTY, 1.0, &mut body);
        assert!(submitted.is_zero());
        body.integrate(1.0);
        assert_eq!(body.velocity(), v);
    }
}
