//! Simulation configuration.

use crate::core::constants::{MAX_DIFFICULTY_LEVEL, MIN_DIFFICULTY_LEVEL};
use crate::spells::aspect::Element;

/// Configuration for a batch of simulated fights.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of fights to run
    pub num_runs: u32,

    /// Base seed; fight `i` uses `seed + i`
    pub seed: u64,

    /// Difficulty level, also used as the simulated character's level
    pub level: u32,

    /// Enemy hit point multiplier
    pub multiplier: f64,

    /// Fight bosses instead of regular enemies
    pub boss: bool,

    /// Aspect of the simulated character
    pub element: Element,

    /// Health potions carried into each fight
    pub health_potions: u32,

    /// Frames before a fight is abandoned as a timeout
    pub max_frames_per_run: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: 42,
            level: 1,
            multiplier: 1.0,
            boss: false,
            element: Element::Fire,
            health_potions: 2,
            max_frames_per_run: 100_000,
        }
    }
}

impl SimConfig {
    /// Level clamped into the supported difficulty range.
    pub fn effective_level(&self) -> u32 {
        self.level.clamp(MIN_DIFFICULTY_LEVEL, MAX_DIFFICULTY_LEVEL)
    }
}
