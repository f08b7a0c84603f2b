//! Game controller and the reports it returns

pub mod controller;
pub mod line;
pub mod outcome;

pub use controller::GameController;
pub use line::CandidateLine;
pub use outcome::{CutRecord, EngineState, GamePhase, LineCheck, SubmitOutcome, SubmitResult};
