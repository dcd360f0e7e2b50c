//! Fixed timestep driver
//!
//! One display frame = read input, run zero or more fixed ticks, then the
//! post-physics step. Only the first tick of a frame sees the latched input;
//! if no tick runs, the input carries over to the next frame.

use glam::Vec3;

use super::body::{Integrate, RigidBody};
use super::dynamic::{DynamicController, ForceState};
use super::input::{InputFrame, InputLatch, KeyBindings, KeyState};
use super::kinematic::{KinematicController, MotionDelta};
use super::light::BlinkingLight;
use super::pose::Pose;
use crate::audio::{AudioSink, Contact, CraftAudio};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Something driven by the fixed tick
pub trait FixedStep {
    fn fixed_step(&mut self, input: &InputFrame, dt: f32);

    /// Post-physics step, once per display frame
    fn late_step(&mut self) {}
}

/// Accumulator-based fixed-step runner
#[derive(Debug, Clone)]
pub struct FrameRunner {
    pub tick_dt: f32,
    pub max_substeps: u32,
    accumulator: f32,
    latch: InputLatch,
    ticks: u64,
}

impl Default for FrameRunner {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FrameRunner {
    pub fn new(tick_dt: f32) -> Self {
        Self {
            tick_dt: tick_dt.max(f32::EPSILON),
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
            latch: InputLatch::new(),
            ticks: 0,
        }
    }

    /// Total fixed ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn latch(&self) -> &InputLatch {
        &self.latch
    }

    /// Run one display frame with keys polled from the host.
    /// Returns the number of fixed ticks run.
    pub fn frame<K, S>(&mut self, frame_dt: f32, keys: &K, bindings: &KeyBindings, stepper: &mut S) -> u32
    where
        K: KeyState + ?Sized,
        S: FixedStep + ?Sized,
    {
        self.latch.read(keys, bindings);
        self.advance(frame_dt, stepper)
    }

    /// Run one display frame with a prebuilt input frame
    pub fn frame_with_input<S: FixedStep + ?Sized>(&mut self, frame_dt: f32, input: InputFrame, stepper: &mut S) -> u32 {
        self.latch.push(input);
        self.advance(frame_dt, stepper)
    }

    fn advance<S: FixedStep + ?Sized>(&mut self, frame_dt: f32, stepper: &mut S) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= self.tick_dt && substeps < self.max_substeps {
            let input = self.latch.consume();
            stepper.fixed_step(&input, self.tick_dt);
            self.accumulator -= self.tick_dt;
            self.ticks += 1;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.tick_dt {
            log::warn!("frame needed more than {} ticks; dropping backlog", self.max_substeps);
            self.accumulator %= self.tick_dt;
        }

        stepper.late_step();
        substeps
    }
}

/// Kinematic controller bound to a pose
#[derive(Debug, Clone, Default)]
pub struct KinematicCraft<P: Pose> {
    pub controller: KinematicController,
    pub pose: P,
    /// Delta from the most recent tick
    pub last_delta: MotionDelta,
}

impl<P: Pose> KinematicCraft<P> {
    pub fn new(controller: KinematicController, pose: P) -> Self {
        Self {
            controller,
            pose,
            last_delta: MotionDelta::default(),
        }
    }
}

impl<P: Pose> FixedStep for KinematicCraft<P> {
    fn fixed_step(&mut self, input: &InputFrame, dt: f32) {
        self.last_delta = self.controller.tick(input, dt, &mut self.pose);
    }
}

/// Force-based controller bound to a body and an audio sink
#[derive(Debug, Clone)]
pub struct DynamicCraft<B, S> {
    pub controller: DynamicController,
    pub body: B,
    pub audio: CraftAudio,
    pub sink: S,
    /// Impulse submitted by the most recent tick
    pub last_impulse: ForceState,
    /// Physics step run after each submission. `None` when the host's
    /// physics engine steps the body itself.
    integrate: Option<fn(&mut B, f32)>,
}

impl<B, S> DynamicCraft<B, S>
where
    B: RigidBody,
    S: AudioSink,
{
    /// Bind to a body stepped by the host
    pub fn new(controller: DynamicController, body: B, audio: CraftAudio, sink: S) -> Self {
        Self {
            controller,
            body,
            audio,
            sink,
            last_impulse: ForceState::ZERO,
            integrate: None,
        }
    }

    /// Also integrate the body after each tick (no host physics engine)
    pub fn with_integration(mut self) -> Self
    where
        B: Integrate,
    {
        self.integrate = Some(<B as Integrate>::integrate);
        self
    }

    pub fn integrates_body(&self) -> bool {
        self.integrate.is_some()
    }

    /// Contact event from the host's collision system
    pub fn on_contact(&mut self, contact: &Contact) {
        self.audio.on_contact(contact, &mut self.sink);
    }

    pub fn speed(&self) -> f32 {
        self.body.velocity().length()
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }
}

impl<B, S> FixedStep for DynamicCraft<B, S>
where
    B: RigidBody,
    S: AudioSink,
{
    fn fixed_step(&mut self, input: &InputFrame, dt: f32) {
        self.last_impulse = self.controller.step(input, dt, &mut self.body);
        if let Some(integrate) = self.integrate {
            integrate(&mut self.body, dt);
        }
    }

    fn late_step(&mut self) {
        self.audio.late_update(&self.body, &mut self.sink);
    }
}

impl FixedStep for BlinkingLight {
    fn fixed_step(&mut self, _input: &InputFrame, _dt: f32) {
        self.tick();
    }
}
