//! Headless Slice Runner
//!
//! Plays a scenario from a cuts file or from seeded random chords and prints
//! the final score as JSON.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::f64::consts::TAU;
use std::fs;
use std::path::PathBuf;

use slice_and_conquer::core::config::EngineConfig;
use slice_and_conquer::core::error::Result;
use slice_and_conquer::game::{CandidateLine, GameController, GamePhase, SubmitOutcome};
use slice_and_conquer::geometry::{GeoPoint, ViewTransform};
use slice_and_conquer::territory::TerritorySetup;

/// Headless Slice Runner - replay or randomize cuts over a scenario
#[derive(Parser, Debug)]
#[command(name = "slice_runner")]
#[command(about = "Apply cuts to a scenario and output the final score")]
struct Args {
    /// Scenario name (loaded from data/scenarios/)
    #[arg(long, default_value = "square")]
    scenario: String,

    /// Engine config TOML; defaults are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// File with one cut per line: x1 y1 x2 y2
    #[arg(long)]
    cuts: Option<PathBuf>,

    /// Number of random chords to try when no cuts file is given
    #[arg(long, default_value_t = 20)]
    random: usize,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,

    /// Log every submitted line to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// JSON output structure
#[derive(Serialize)]
struct RunResult {
    scenario: String,
    score: u32,
    max_score: u32,
    captured_percent: f64,
    captured_landmarks: Vec<String>,
    cuts_submitted: usize,
    cuts_applied: usize,
    cuts_rejected: usize,
    budget_used: f64,
    budget_capacity: f64,
    game_over: bool,
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if args.verbose {
            "slice_and_conquer=debug"
        } else {
            "slice_and_conquer=warn"
        })
        .with_writer(std::io::stderr)
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let setup = TerritorySetup::load_named(&args.scenario)?.with_name(args.scenario.clone());

    let lines = match &args.cuts {
        Some(path) => read_cuts(&fs::read_to_string(path)?),
        None => random_chords(&setup.boundary, args.random, &mut rng),
    };

    let mut game = GameController::initialize(setup, ViewTransform::identity(), config)?;

    let mut submitted = 0;
    let mut rejected = 0;
    for line in &lines {
        if game.phase() == GamePhase::GameOver {
            break;
        }
        let result = match game.submit(line) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Skipping line {:?}: {}", line.segment, e);
                continue;
            }
        };
        submitted += 1;
        if args.verbose {
            eprintln!(
                "({:.3}, {:.3}) -> ({:.3}, {:.3}): {:?}",
                line.segment.start.x,
                line.segment.start.y,
                line.segment.end.x,
                line.segment.end.y,
                result.outcome
            );
        }
        if !matches!(result.outcome, SubmitOutcome::Applied { .. }) {
            rejected += 1;
        }
    }

    let state = game.state();
    let result = RunResult {
        scenario: args.scenario.clone(),
        score: state.score,
        max_score: state.max_score,
        captured_percent: game.score_breakdown().captured_percent,
        captured_landmarks: state.captured_landmarks.clone(),
        cuts_submitted: submitted,
        cuts_applied: game.history().len(),
        cuts_rejected: rejected,
        budget_used: state.consumed,
        budget_capacity: state.capacity,
        game_over: state.phase == GamePhase::GameOver,
        seed,
    };

    match args.format.as_str() {
        "text" => {
            println!("Slice Result");
            println!("============");
            println!("Scenario: {}", result.scenario);
            println!("Score: {} / {}", result.score, result.max_score);
            println!("Captured: {:.2}%", result.captured_percent);
            println!("Landmarks: {}", result.captured_landmarks.join(", "));
            println!(
                "Cuts: {} submitted, {} applied, {} rejected",
                result.cuts_submitted, result.cuts_applied, result.cuts_rejected
            );
            println!(
                "Budget: {:.3} / {:.3}{}",
                result.budget_used,
                result.budget_capacity,
                if result.game_over { " (game over)" } else { "" }
            );
            println!("Seed: {}", result.seed);
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }
    Ok(())
}

/// Parse a cuts file; blank lines and `#` comments are skipped
fn read_cuts(contents: &str) -> Vec<CandidateLine> {
    contents
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .filter_map(|l| {
            let values: Vec<f64> = l
                .split_whitespace()
                .filter_map(|v| v.parse().ok())
                .collect();
            match values.as_slice() {
                [x1, y1, x2, y2] => Some(CandidateLine::from_coords(*x1, *y1, *x2, *y2)),
                _ => {
                    eprintln!("Ignoring malformed cut '{}'", l);
                    None
                }
            }
        })
        .collect()
}

/// Chords between random points on a circle enclosing the territory
fn random_chords(boundary: &[GeoPoint], count: usize, rng: &mut StdRng) -> Vec<CandidateLine> {
    let n = boundary.len().max(1) as f64;
    let cx = boundary.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = boundary.iter().map(|p| p.y).sum::<f64>() / n;
    let reach = boundary
        .iter()
        .map(|p| p.distance(&GeoPoint::new(cx, cy)))
        .fold(0.0, f64::max)
        * 1.1;

    (0..count)
        .map(|_| {
            let a: f64 = rng.gen_range(0.0..TAU);
            let b: f64 = a + rng.gen_range(0.3..TAU - 0.3);
            CandidateLine::from_coords(
                cx + reach * a.cos(),
                cy + reach * a.sin(),
                cx + reach * b.cos(),
                cy + reach * b.sin(),
            )
        })
        .collect()
}
