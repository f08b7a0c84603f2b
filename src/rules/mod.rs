//! Game rules: stronghold legality, cutting budget and scoring

pub mod budget;
pub mod scoring;
pub mod stronghold;

pub use budget::{slicing_length, west_east_span, BudgetDecision, BudgetTracker};
pub use scoring::{ScoreBreakdown, ScoreModel};
pub use stronghold::{find_violation, Stronghold, Violation};
