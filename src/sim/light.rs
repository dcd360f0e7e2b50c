//! Duty-cycle blinking light
//!
//! Two states, lit and unlit, each held for a configured number of ticks.

use serde::{Deserialize, Serialize};

/// Lit/unlit durations in ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub lit_frames: u32,
    pub unlit_frames: u32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            lit_frames: 120,
            unlit_frames: 120,
        }
    }
}

/// Counter plus lit flag; the counter restarts at every flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightCycleState {
    pub frames: u32,
    pub lit: bool,
}

impl Default for LightCycleState {
    fn default() -> Self {
        Self {
            frames: 0,
            lit: true,
        }
    }
}

/// Host light that can follow the cycle
pub trait Lamp {
    fn set_enabled(&mut self, enabled: bool);
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlinkingLight {
    pub config: LightConfig,
    pub state: LightCycleState,
}

impl BlinkingLight {
    pub fn new(config: LightConfig) -> Self {
        Self {
            config,
            state: LightCycleState::default(),
        }
    }

    pub fn is_lit(&self) -> bool {
        self.state.lit
    }

    /// Ticks the current state lasts (never less than one)
    fn current_duration(&self) -> u32 {
        let frames = if self.state.lit {
            self.config.lit_frames
        } else {
            self.config.unlit_frames
        };
        frames.max(1)
    }

    /// Advance one tick. Returns the new lit flag when the state flips.
    pub fn tick(&mut self) -> Option<bool> {
        self.state.frames += 1;
        if self.state.frames >= self.current_duration() {
            self.state.frames = 0;
            self.state.lit = !self.state.lit;
            log::trace!("light {}", if self.state.lit { "on" } else { "off" });
            Some(self.state.lit)
        } else {
            None
        }
    }

    /// Tick and push any flip to the host light
    pub fn tick_lamp<L: Lamp + ?Sized>(&mut self, lamp: &mut L) {
        if let Some(lit) = self.tick() {
            lamp.set_enabled(lit);
        }
    }
}
