//! Deterministic control module
//!
//! All control logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Host objects reached only through the `Pose`/`RigidBody`/`AudioSink` traits
//! - No rendering or platform dependencies

pub mod axes;
pub mod body;
pub mod dynamic;
pub mod input;
pub mod kinematic;
pub mod light;
pub mod pose;
pub mod runner;

pub use axes::{LocalAxes, MOVEMENT_TABLE, MoveAxis, ROTATION_TABLE, RotationAxis};
pub use body::{ForceMode, Integrate, PointMass, RigidBody};
pub use dynamic::{DynamicConfig, DynamicController, ForceState};
pub use input::{Command, InputFrame, InputLatch, Key, KeyBindings, KeyState};
pub use kinematic::{KinematicConfig, KinematicController, MotionDelta, MotionState};
pub use light::{BlinkingLight, Lamp, LightConfig, LightCycleState};
pub use pose::{Pose, Transform};
pub use runner::{DynamicCraft, FixedStep, FrameRunner, KinematicCraft};
