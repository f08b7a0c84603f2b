//! Reports handed back to the embedding application

use serde::{Deserialize, Serialize};

use crate::core::types::{LineId, RegionId};
use crate::rules::{Stronghold, Violation};
use crate::territory::Region;

/// Game phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    Active,
    GameOver,
}

/// What happened to a submitted line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The cut went through
    Applied {
        score_delta: i64,
        new_regions: Vec<RegionId>,
        cost: f64,
    },
    /// The line broke a legality rule; nothing changed
    RejectedIllegal { violation: Violation },
    /// The cut was legal but too long for the remaining budget; the game is over
    RejectedBudgetExceeded { required: f64, remaining: f64 },
    /// The game had already ended
    RejectedGameOver,
}

impl SubmitOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, SubmitOutcome::Applied { .. })
    }
}

/// Read-only snapshot of the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineState {
    pub regions: Vec<Region>,
    pub score: u32,
    pub max_score: u32,
    pub remaining_capacity_fraction: f64,
    pub phase: GamePhase,
    pub consumed: f64,
    pub capacity: f64,
    pub stronghold: Stronghold,
    pub captured_landmarks: Vec<String>,
    pub cuts_made: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitResult {
    pub outcome: SubmitOutcome,
    #[serde(flatten)]
    pub state: EngineState,
}

/// Answer to a legality query for a line being drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineCheck {
    pub legal: bool,
    pub violation: Option<Violation>,
    /// Geographic length the cut would be charged
    pub slicing_length: f64,
    /// Whether the remaining budget covers that length
    pub affordable: bool,
}

/// One applied cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutRecord {
    pub line: LineId,
    pub cost: f64,
    pub score_after: u32,
    pub new_regions: Vec<RegionId>,
}
