//! Engine configuration with documented constants
//!
//! Every tunable number of the slicing rules lives here, with a note on how it
//! shapes play.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{EngineError, Result};

/// Tunables for legality, budget and scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === BUDGET ===
    /// Cutting capacity as a multiple of the west-east span of the territory
    ///
    /// At 1.7 the player can cross the whole map slightly less than twice.
    /// Larger values make the game longer and the landmarks easier to reach.
    pub budget_multiplier: f64,

    /// Slack used when comparing consumed length against capacity
    ///
    /// A cut that lands within this distance of the capacity is treated as
    /// landing exactly on it, so summed floats do not turn an exact fill
    /// into a rejection.
    pub exhaustion_tolerance: f64,

    // === STRONGHOLD ===
    /// Fraction of the current regime area covered by the stronghold circle
    ///
    /// At 0.5 the circle holds half of what the regime still owns, so the
    /// protected zone shrinks as the player carves territory away.
    pub stronghold_area_fraction: f64,

    // === SCORING ===
    /// Points for every percent of territory captured
    pub points_per_percent: u32,

    /// Points for every landmark inside a captured region
    pub points_per_landmark: u32,

    // === GEOMETRY ===
    /// Cross products below this magnitude mean parallel segments
    pub parallel_epsilon: f64,

    /// Boundary crossings closer than this are the same crossing
    ///
    /// A line passing exactly through a vertex touches two edges at one point;
    /// merging keeps that a single crossing.
    pub merge_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            budget_multiplier: 1.7,
            exhaustion_tolerance: 1e-9,
            stronghold_area_fraction: 0.5,
            points_per_percent: 5,
            points_per_landmark: 50,
            parallel_epsilon: 1e-10,
            merge_epsilon: 1e-9,
        }
    }
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a TOML file; missing keys fall back to defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: EngineConfig = toml::from_str(&contents)?;
        config.validate().map_err(EngineError::InvalidConfig)?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.budget_multiplier.is_finite() && self.budget_multiplier > 0.0) {
            return Err(format!(
                "budget_multiplier ({}) must be a positive number",
                self.budget_multiplier
            ));
        }

        if !(self.stronghold_area_fraction >= 0.0 && self.stronghold_area_fraction < 1.0) {
            return Err(format!(
                "stronghold_area_fraction ({}) must be in [0, 1)",
                self.stronghold_area_fraction
            ));
        }

        if self.parallel_epsilon <= 0.0 || self.merge_epsilon <= 0.0 {
            return Err("Geometric tolerances must be positive".into());
        }

        if self.exhaustion_tolerance < 0.0 {
            return Err("exhaustion_tolerance must not be negative".into());
        }

        Ok(())
    }
}
