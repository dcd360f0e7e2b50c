//! Command -> axis tables
//!
//! Each directional command maps to one axis and a sign. Accumulation walks
//! the table, so opposing commands cancel exactly.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::input::{Command, InputFrame};

/// Rotation axis of the craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationAxis {
    /// About the local forward axis
    Roll,
    /// About the local right axis
    Pitch,
    /// About the local up axis
    Yaw,
}

/// Translation axis of the craft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveAxis {
    Forward,
    Right,
    Up,
}

/// Rotation commands: (command, axis, sign)
pub const ROTATION_TABLE: [(Command, RotationAxis, f32); 6] = [
    (Command::RollLeft, RotationAxis::Roll, 1.0),
    (Command::RollRight, RotationAxis::Roll, -1.0),
    (Command::PitchUp, RotationAxis::Pitch, -1.0),
    (Command::PitchDown, RotationAxis::Pitch, 1.0),
    (Command::YawLeft, RotationAxis::Yaw, -1.0),
    (Command::YawRight, RotationAxis::Yaw, 1.0),
];

/// Movement commands: (command, axis, sign)
pub const MOVEMENT_TABLE: [(Command, MoveAxis, f32); 6] = [
    (Command::MoveForward, MoveAxis::Forward, 1.0),
    (Command::MoveBackward, MoveAxis::Forward, -1.0),
    (Command::MoveLeft, MoveAxis::Right, -1.0),
    (Command::MoveRight, MoveAxis::Right, 1.0),
    (Command::MoveUp, MoveAxis::Up, 1.0),
    (Command::MoveDown, MoveAxis::Up, -1.0),
];

/// Local basis of a pose, in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalAxes {
    pub forward: Vec3,
    pub right: Vec3,
    pub up: Vec3,
}

impl Default for LocalAxes {
    fn default() -> Self {
        Self {
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl LocalAxes {
    pub fn axis(&self, axis: MoveAxis) -> Vec3 {
        match axis {
            MoveAxis::Forward => self.forward,
            MoveAxis::Right => self.right,
            MoveAxis::Up => self.up,
        }
    }

    /// Axis a rotation command turns about
    pub fn rotation_axis(&self, axis: RotationAxis) -> Vec3 {
        match axis {
            RotationAxis::Roll => self.forward,
            RotationAxis::Pitch => self.right,
            RotationAxis::Yaw => self.up,
        }
    }
}

/// Rotation change for one tick, packed as (roll, pitch, yaw)
pub fn accumulate_rotation(frame: &InputFrame, step: f32) -> Vec3 {
    let mut delta = Vec3::ZERO;
    for (command, axis, sign) in ROTATION_TABLE {
        if frame.is_set(command) {
            match axis {
                RotationAxis::Roll => delta.x += sign * step,
                RotationAxis::Pitch => delta.y += sign * step,
                RotationAxis::Yaw => delta.z += sign * step,
            }
        }
    }
    delta
}

/// Linear change for one tick along the current local axes.
///
/// `forward_scale` multiplies the forward command only (the force-based
/// controller gives forward thrust its own multiplier).
pub fn accumulate_movement(
    frame: &InputFrame,
    axes: &LocalAxes,
    step: f32,
    forward_scale: f32,
) -> Vec3 {
    let mut delta = Vec3::ZERO;
    for (command, axis, sign) in MOVEMENT_TABLE {
        if frame.is_set(command) {
            let scale = if command == Command::MoveForward {
                forward_scale
            } else {
                1.0
            };
            delta += axes.axis(axis) * (sign * step * scale);
        }
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rotation_flag() {
        let frame = InputFrame::from_commands(&[Command::PitchUp]);
        let delta = accumulate_rotation(&frame, 0.5);
        assert_eq!(delta, Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_opposing_flags_cancel() {
        let frame = InputFrame::from_commands(&[Command::YawLeft, Command::YawRight]);
        assert_eq!(accumulate_rotation(&frame, 0.3).z, 0.0);

        let frame = InputFrame::from_commands(&[Command::MoveUp, Command::MoveDown]);
        assert_eq!(
            accumulate_movement(&frame, &LocalAxes::default(), 0.3, 1.0),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_flags_combine() {
        let frame = InputFrame::from_commands(&[Command::RollLeft, Command::PitchUp]);
        assert_eq!(accumulate_rotation(&frame, 1.0), Vec3::new(1.0, -1.0, 0.0));

        let frame = InputFrame::from_commands(&[Command::MoveForward, Command::MoveRight]);
        let delta = accumulate_movement(&frame, &LocalAxes::default(), 1.0, 1.0);
        assert_eq!(delta, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_forward_scale_only_applies_forward() {
        let axes = LocalAxes::default();
        let forward = InputFrame::from_commands(&[Command::MoveForward]);
        assert_eq!(accumulate_movement(&forward, &axes, 1.0, 3.0), Vec3::new(0.0, 0.0, 3.0));

        let back = InputFrame::from_commands(&[Command::MoveBackward]);
        assert_eq!(accumulate_movement(&back, &axes, 1.0, 3.0), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_movement_follows_local_axes() {
        let axes = LocalAxes {
            forward: Vec3::X,
            right: Vec3::NEG_Z,
            up: Vec3::Y,
        };
        let frame = InputFrame::from_commands(&[Command::MoveLeft]);
        assert_eq!(accumulate_movement(&frame, &axes, 2.0, 1.0), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_stop_flags_do_not_move() {
        let frame = InputFrame::from_commands(&[Command::StopMovement, Command::StopRotation]);
        assert_eq!(accumulate_rotation(&frame, 1.0), Vec3::ZERO);
        assert_eq!(
            accumulate_movement(&frame, &LocalAxes::default(), 1.0, 1.0),
            Vec3::ZERO
        );
    }
}
