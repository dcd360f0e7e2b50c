//! Craft audio feedback
//!
//! Volume math only: the host plays the clips. Propulsion hum follows the
//! body's speed every frame; contacts fire a one-shot impact sound.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::lerp_clamped;
use crate::sim::body::RigidBody;

/// Host audio output
pub trait AudioSink {
    /// Continuous propulsion loop volume
    fn set_propulsion_volume(&mut self, volume: f32);
    /// One-shot impact sound at a world position
    fn play_one_shot(&mut self, point: Vec3, volume: f32);
}

/// Audio tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Propulsion volume at rest
    pub propulsion_min_volume: f32,
    /// Propulsion volume at full speed
    pub propulsion_max_volume: f32,
    /// Multiplier turning squared speed into the lerp parameter
    pub speed_volume_scale: f32,
    /// Low end of the random impact volume draw
    pub impact_volume_low: f32,
    /// High end of the random impact volume draw
    pub impact_volume_high: f32,
    /// Multiplier on impact volume after scaling by impact speed
    pub impact_multiplier: f32,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    pub muted: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            propulsion_min_volume: 0.2,
            propulsion_max_volume: 1.0,
            speed_volume_scale: 0.01,
            impact_volume_low: 0.5,
            impact_volume_high: 1.0,
            impact_multiplier: 0.1,
            master_volume: 1.0,
            muted: false,
        }
    }
}

/// A contact reported by the host's collision system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// World-space contact point
    pub point: Vec3,
    /// Relative speed of the two bodies at impact
    pub relative_speed: f32,
}

/// Audio driver for one craft
#[derive(Debug, Clone)]
pub struct CraftAudio {
    pub config: AudioConfig,
    rng: Pcg32,
}

impl CraftAudio {
    /// Create with a seeded RNG (impact volumes are reproducible per seed)
    pub fn new(config: AudioConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.config.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.config.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.config.muted {
            0.0
        } else {
            self.config.master_volume
        }
    }

    /// Propulsion volume for a squared speed, before master volume
    pub fn propulsion_volume(&self, speed_squared: f32) -> f32 {
        lerp_clamped(
            self.config.propulsion_min_volume,
            self.config.propulsion_max_volume,
            speed_squared * self.config.speed_volume_scale,
        )
    }

    /// Post-physics step: follow the body's current speed
    pub fn late_update<B, S>(&self, body: &B, sink: &mut S)
    where
        B: RigidBody + ?Sized,
        S: AudioSink + ?Sized,
    {
        let volume = self.propulsion_volume(body.velocity().length_squared());
        sink.set_propulsion_volume(volume * self.effective_volume());
    }

    /// Impact volume for a contact, before master volume. Consumes one draw.
    pub fn impact_volume(&mut self, relative_speed: f32) -> f32 {
        let lo = self.config.impact_volume_low.min(self.config.impact_volume_high);
        let hi = self.config.impact_volume_low.max(self.config.impact_volume_high);
        let draw = self.rng.random_range(lo..=hi);
        draw * relative_speed * self.config.impact_multiplier
    }

    /// Contact event: fire and forget a one-shot at the contact point
    pub fn on_contact<S: AudioSink + ?Sized>(&mut self, contact: &Contact, sink: &mut S) {
        let volume = self.impact_volume(contact.relative_speed) * self.effective_volume();
        log::debug!(
            "impact at {:?} speed {:.2} volume {:.3}",
            contact.point,
            contact.relative_speed,
            volume
        );
        sink.play_one_shot(contact.point, volume);
    }
}

/// Sink that remembers what it was told (headless runs and tests)
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub propulsion_volume: f32,
    pub one_shots: Vec<(Vec3, f32)>,
}

impl AudioSink for RecordingSink {
    fn set_propulsion_volume(&mut self, volume: f32) {
        self.propulsion_volume = volume;
    }

    fn play_one_shot(&mut self, point: Vec3, volume: f32) {
        self.one_shots.push((point, volume));
    }
}
