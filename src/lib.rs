//! Flight Control - input-driven motion model for a hovering craft
//!
//! Core modules:
//! - `sim`: Deterministic per-tick control updates (kinematic and force-based
//!   controllers, duty-cycle light, fixed-step runner)
//! - `audio`: Propulsion and impact volume for the force-based craft
//! - `settings`: Data-driven tuning loaded from JSON

pub mod audio;
pub mod settings;
pub mod sim;

pub use audio::{AudioConfig, AudioSink, Contact, CraftAudio};
pub use settings::{HandlingPreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (50 Hz, the usual engine physics rate)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the runner will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Clamp a scalar rate to `[-max, max]`
#[inline]
pub fn clamp_symmetric(value: f32, max: f32) -> f32 {
    let max = max.abs();
    value.clamp(-max, max)
}

/// Linear interpolation with `t` clamped to `[0, 1]`
#[inline]
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_symmetric() {
        assert_eq!(clamp_symmetric(3.0, 2.0), 2.0);
        assert_eq!(clamp_symmetric(-3.0, 2.0), -2.0);
        assert_eq!(clamp_symmetric(1.5, 2.0), 1.5);
        // Negative caps behave like their magnitude
        assert_eq!(clamp_symmetric(5.0, -2.0), 2.0);
    }

    #[test]
    fn test_lerp_clamped() {
        assert_eq!(lerp_clamped(0.2, 1.0, 0.0), 0.2);
        assert_eq!(lerp_clamped(0.2, 1.0, 1.0), 1.0);
        assert_eq!(lerp_clamped(0.2, 1.0, 5.0), 1.0);
        assert_eq!(lerp_clamped(0.2, 1.0, -1.0), 0.2);
        assert!((lerp_clamped(0.0, 1.0, 0.25) - 0.25).abs() < 1e-6);
    }
}
