//! Game controller
//!
//! Each submit: phase → convert → legality → budget → split → rescore → terminal check.
//! The controller owns the partition, the budget and the phase; nothing else
//! mutates them.

use crate::core::config::EngineConfig;
use crate::core::error::{EngineError, Result};
use crate::geometry::{GeoPoint, GeoSegment, ViewTransform};
use crate::rules::{
    find_violation, slicing_length, BudgetDecision, BudgetTracker, ScoreBreakdown, ScoreModel,
    Stronghold,
};
use crate::territory::{Landmark, Partition, Region, TerritorySetup, Tolerance};

use super::line::CandidateLine;
use super::outcome::{CutRecord, EngineState, GamePhase, LineCheck, SubmitOutcome, SubmitResult};

#[derive(Debug, Clone)]
pub struct GameController {
    config: EngineConfig,
    tolerance: Tolerance,
    setup: TerritorySetup,
    transform: ViewTransform,
    partition: Partition,
    budget: BudgetTracker,
    scoring: ScoreModel,
    score: ScoreBreakdown,
    phase: GamePhase,
    history: Vec<CutRecord>,
}

impl GameController {
    /// Build a fresh game over `setup`
    pub fn initialize(
        setup: TerritorySetup,
        transform: ViewTransform,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate().map_err(EngineError::InvalidConfig)?;
        setup.validate()?;
        transform.validate()?;

        let partition = Partition::new(setup.boundary.clone());
        let budget = BudgetTracker::for_boundary(
            &setup.boundary,
            config.budget_multiplier,
            config.exhaustion_tolerance,
        );
        let scoring = ScoreModel::new(partition.total_area(), setup.landmarks.len(), &config);
        let score = scoring.evaluate(partition.regions(), &setup.landmarks);

        tracing::info!(
            "Initialized '{}': {} boundary vertices, {} landmarks, capacity {:.3}",
            setup.name,
            setup.boundary.len(),
            setup.landmarks.len(),
            budget.capacity()
        );

        Ok(Self {
            tolerance: Tolerance::from(&config),
            config,
            setup,
            transform,
            partition,
            budget,
            scoring,
            score,
            phase: GamePhase::Active,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn score_breakdown(&self) -> &ScoreBreakdown {
        &self.score
    }

    pub fn max_score(&self) -> u32 {
        self.scoring.max_score()
    }

    pub fn regions(&self) -> &[Region] {
        self.partition.regions()
    }

    pub fn budget(&self) -> &BudgetTracker {
        &self.budget
    }

    pub fn capital(&self) -> GeoPoint {
        self.setup.capital
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.setup.landmarks
    }

    pub fn history(&self) -> &[CutRecord] {
        &self.history
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    /// Swap in a new view transform; regions, budget and score are untouched
    pub fn set_transform(&mut self, transform: ViewTransform) -> Result<()> {
        transform.validate()?;
        self.transform = transform;
        Ok(())
    }

    /// Stronghold for the current partition
    pub fn stronghold(&self) -> Stronghold {
        Stronghold::for_partition(
            &self.partition,
            self.setup.capital,
            self.config.stronghold_area_fraction,
        )
    }

    /// Convert a view line into the geographic frame, refusing malformed input
    fn to_geo_line(&self, line: &CandidateLine) -> Result<GeoSegment> {
        if !line.segment.is_finite() {
            tracing::warn!("Rejected line {:?}: non-finite coordinate", line.id);
            return Err(EngineError::NonFiniteCoordinate);
        }
        let geo = self.transform.segment_to_geo(&line.segment);
        if line.segment.is_degenerate(self.config.parallel_epsilon)
            || geo.is_degenerate(self.config.parallel_epsilon)
        {
            tracing::warn!("Rejected line {:?}: zero length", line.id);
            return Err(EngineError::DegenerateLine);
        }
        Ok(geo)
    }

    /// Legality of a line being drawn; never changes state
    pub fn set_candidate_line(&self, line: &CandidateLine) -> Result<LineCheck> {
        let geo = self.to_geo_line(line)?;
        let violation = find_violation(&self.partition, &self.stronghold(), &geo, self.tolerance);
        let length = slicing_length(&self.partition, &geo, self.tolerance);
        Ok(LineCheck {
            legal: violation.is_none(),
            violation,
            slicing_length: length,
            affordable: self.budget.can_afford(length),
        })
    }

    /// Commit a line
    pub fn submit(&mut self, line: &CandidateLine) -> Result<SubmitResult> {
        if self.phase == GamePhase::GameOver {
            return Ok(self.result(SubmitOutcome::RejectedGameOver));
        }
        let geo = self.to_geo_line(line)?;

        // Legality is always re-checked at commit time
        if let Some(violation) =
            find_violation(&self.partition, &self.stronghold(), &geo, self.tolerance)
        {
            tracing::debug!("Rejected line {:?}: {}", line.id, violation);
            return Ok(self.result(SubmitOutcome::RejectedIllegal { violation }));
        }

        let length = slicing_length(&self.partition, &geo, self.tolerance);
        let cost = match self.budget.try_consume(length) {
            BudgetDecision::Exceeded {
                required,
                remaining,
            } => {
                self.phase = GamePhase::GameOver;
                tracing::info!(
                    "Game over: cut needs {:.3} but only {:.3} remains",
                    required,
                    remaining
                );
                return Ok(self.result(SubmitOutcome::RejectedBudgetExceeded {
                    required,
                    remaining,
                }));
            }
            BudgetDecision::Accepted { cost } => cost,
        };

        let before = self.score();
        let new_regions = self.partition.apply_cut(&geo, self.setup.capital, self.tolerance);
        self.rescore();
        let score_delta = i64::from(self.score()) - i64::from(before);

        self.history.push(CutRecord {
            line: line.id,
            cost,
            score_after: self.score(),
            new_regions: new_regions.clone(),
        });
        tracing::info!(
            "Applied cut {:?}: cost {:.3}, {} new regions, score {} ({:+})",
            line.id,
            cost,
            new_regions.len(),
            self.score(),
            score_delta
        );

        if self.budget.is_exhausted() {
            self.phase = GamePhase::GameOver;
            tracing::info!("Game over: cutting budget spent, final score {}", self.score());
        }

        Ok(self.result(SubmitOutcome::Applied {
            score_delta,
            new_regions,
            cost,
        }))
    }

    /// Back to the single initial region with a full budget
    pub fn reset(&mut self) -> EngineState {
        self.partition.reset();
        self.budget.reset();
        self.history.clear();
        self.phase = GamePhase::Active;
        self.rescore();
        tracing::info!("Reset '{}'", self.setup.name);
        self.state()
    }

    /// Read-only snapshot
    pub fn state(&self) -> EngineState {
        EngineState {
            regions: self.partition.regions().to_vec(),
            score: self.score(),
            max_score: self.max_score(),
            remaining_capacity_fraction: self.budget.remaining_fraction(),
            phase: self.phase,
            consumed: self.budget.consumed(),
            capacity: self.budget.capacity(),
            stronghold: self.stronghold(),
            captured_landmarks: self.score.captured_landmarks.clone(),
            cuts_made: self.history.len(),
        }
    }

    fn rescore(&mut self) {
        self.score = self
            .scoring
            .evaluate(self.partition.regions(), &self.setup.landmarks);
    }

    fn result(&self, outcome: SubmitOutcome) -> SubmitResult {
        SubmitResult {
            outcome,
            state: self.state(),
        }
    }
}
