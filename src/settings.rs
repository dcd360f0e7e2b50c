//! Controller settings and tuning
//!
//! Stored as a JSON file next to the host's other config. Every section
//! defaults, so a partial file only overrides what it names.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::audio::AudioConfig;
use crate::consts::SIM_DT;
use crate::sim::{DynamicConfig, KeyBindings, KinematicConfig, LightConfig};

/// Handling preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HandlingPreset {
    Gentle,
    #[default]
    Standard,
    Agile,
}

impl HandlingPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlingPreset::Gentle => "Gentle",
            HandlingPreset::Standard => "Standard",
            HandlingPreset::Agile => "Agile",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gentle" | "easy" => Some(HandlingPreset::Gentle),
            "standard" | "std" => Some(HandlingPreset::Standard),
            "agile" => Some(HandlingPreset::Agile),
            _ => None,
        }
    }

    /// Multiplier on acceleration terms
    pub fn acceleration_scale(&self) -> f32 {
        match self {
            HandlingPreset::Gentle => 0.5,
            HandlingPreset::Standard => 1.0,
            HandlingPreset::Agile => 2.0,
        }
    }

    /// Multiplier on speed and torque caps
    pub fn cap_scale(&self) -> f32 {
        match self {
            HandlingPreset::Gentle => 0.75,
            HandlingPreset::Standard => 1.0,
            HandlingPreset::Agile => 1.5,
        }
    }
}

/// All controller tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Handling preset the tuning was derived from
    pub preset: HandlingPreset,
    /// Fixed tick duration (seconds)
    pub tick_dt: f32,
    /// Seed for the impact volume RNG
    pub audio_seed: u64,

    pub kinematic: KinematicConfig,
    pub dynamic: DynamicConfig,
    pub audio: AudioConfig,
    pub light: LightConfig,
    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: HandlingPreset::Standard,
            tick_dt: SIM_DT,
            audio_seed: 0x5EED,
            kinematic: KinematicConfig::default(),
            dynamic: DynamicConfig::default(),
            audio: AudioConfig::default(),
            light: LightConfig::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a handling preset (applies preset tuning)
    pub fn from_preset(preset: HandlingPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Reset controller tuning to the preset's values
    pub fn apply_preset(&mut self, preset: HandlingPreset) {
        self.preset = preset;
        let accel = preset.acceleration_scale();
        let cap = preset.cap_scale();

        let k = KinematicConfig::default();
        self.kinematic = KinematicConfig {
            move_acceleration: k.move_acceleration * accel,
            rotate_acceleration: k.rotate_acceleration * accel,
            max_speed: k.max_speed * cap,
            max_roll_speed: k.max_roll_speed * cap,
            max_pitch_speed: k.max_pitch_speed * cap,
            max_yaw_speed: k.max_yaw_speed * cap,
            ..k
        };

        let d = DynamicConfig::default();
        self.dynamic = DynamicConfig {
            move_acceleration: d.move_acceleration * accel,
            rotate_acceleration: d.rotate_acceleration * accel,
            max_force: d.max_force * cap,
            max_roll_torque: d.max_roll_torque * cap,
            max_pitch_torque: d.max_pitch_torque * cap,
            max_yaw_torque: d.max_yaw_torque * cap,
            ..d
        };
    }

    /// Force values into usable ranges (hand-edited files)
    pub fn sanitize(&mut self) {
        if !(self.tick_dt.is_finite() && self.tick_dt > 0.0) {
            log::warn!("Invalid tick_dt {}, using {}", self.tick_dt, SIM_DT);
            self.tick_dt = SIM_DT;
        }

        let k = &mut self.kinematic;
        for v in [
            &mut k.max_speed,
            &mut k.min_speed,
            &mut k.min_rotation_speed,
            &mut k.max_roll_speed,
            &mut k.max_pitch_speed,
            &mut k.max_yaw_speed,
            &mut k.stop_deceleration,
            &mut k.rotation_damping,
        ] {
            *v = v.abs();
        }

        let d = &mut self.dynamic;
        for v in [
            &mut d.max_force,
            &mut d.max_roll_torque,
            &mut d.max_pitch_torque,
            &mut d.max_yaw_torque,
        ] {
            *v = v.abs();
        }

        let a = &mut self.audio;
        if a.impact_volume_low > a.impact_volume_high {
            std::mem::swap(&mut a.impact_volume_low, &mut a.impact_volume_high);
        }
        a.master_volume = a.master_volume.clamp(0.0, 1.0);

        self.light.lit_frames = self.light.lit_frames.max(1);
        self.light.unlit_frames = self.light.unlit_frames.max(1);
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
