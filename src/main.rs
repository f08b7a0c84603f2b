//! Slice & Conquer - Console Entry Point
//!
//! Loads a scenario and lets the player type cuts in geographic coordinates.
//! The identity transform is used, so what you type is what the engine sees.

use slice_and_conquer::core::config::EngineConfig;
use slice_and_conquer::core::error::Result;
use slice_and_conquer::game::{CandidateLine, GameController, GamePhase, SubmitOutcome};
use slice_and_conquer::geometry::ViewTransform;
use slice_and_conquer::territory::TerritorySetup;

use std::io::{self, Write};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("slice_and_conquer=info")
        .init();

    let scenario = std::env::args().nth(1).unwrap_or_else(|| "square".to_string());
    tracing::info!("Slice & Conquer starting with scenario '{}'", scenario);

    let setup = TerritorySetup::load_named(&scenario)?.with_name(scenario.clone());
    let mut game = GameController::initialize(setup, ViewTransform::identity(), EngineConfig::default())?;

    println!("\n=== SLICE & CONQUER ===");
    println!("Carve the territory away from its capital");
    println!();
    println!("Commands:");
    println!("  cut x1 y1 x2 y2    - Submit a line");
    println!("  check x1 y1 x2 y2  - Test a line without cutting");
    println!("  status / s         - Show regions and landmarks");
    println!("  reset / r          - Start over");
    println!("  quit / q           - Exit");
    println!();

    loop {
        display_status(&game);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&game);
            continue;
        }

        if input == "reset" || input == "r" {
            game.reset();
            println!("Territory restored.");
            continue;
        }

        if let Some(rest) = input.strip_prefix("check ") {
            let Some(line) = parse_line(rest) else {
                println!("Usage: check x1 y1 x2 y2");
                continue;
            };
            match game.set_candidate_line(&line) {
                Ok(check) => {
                    match check.violation {
                        Some(v) => println!("Illegal: {}", v),
                        None => println!("Legal"),
                    }
                    println!(
                        "Length {:.3} ({})",
                        check.slicing_length,
                        if check.affordable { "affordable" } else { "over budget" }
                    );
                }
                Err(e) => println!("Bad line: {}", e),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("cut ") {
            let Some(line) = parse_line(rest) else {
                println!("Usage: cut x1 y1 x2 y2");
                continue;
            };
            match game.submit(&line) {
                Ok(result) => match result.outcome {
                    SubmitOutcome::Applied {
                        score_delta,
                        new_regions,
                        cost,
                    } => println!(
                        "Cut! {} new regions, cost {:.3}, score {:+}",
                        new_regions.len(),
                        cost,
                        score_delta
                    ),
                    SubmitOutcome::RejectedIllegal { violation } => {
                        println!("Rejected: {}", violation)
                    }
                    SubmitOutcome::RejectedBudgetExceeded {
                        required,
                        remaining,
                    } => println!(
                        "Out of budget: needed {:.3}, had {:.3}",
                        required, remaining
                    ),
                    SubmitOutcome::RejectedGameOver => {
                        println!("The game is over. Type 'reset' to play again.")
                    }
                },
                Err(e) => println!("Bad line: {}", e),
            }
            continue;
        }

        println!("Unknown command. Available: cut, check, status, reset, quit");
    }

    println!(
        "\nGoodbye! Final score {} / {} after {} cuts.",
        game.score(),
        game.max_score(),
        game.history().len()
    );
    Ok(())
}

/// Parse four whitespace-separated numbers into a line
fn parse_line(text: &str) -> Option<CandidateLine> {
    let values: Vec<f64> = text
        .split_whitespace()
        .map(|v| v.parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Some(CandidateLine::from_coords(*x1, *y1, *x2, *y2)),
        _ => None,
    }
}

/// Display a one-line summary
fn display_status(game: &GameController) {
    let state = game.state();
    println!();
    println!(
        "--- Score {} / {} | Regions: {} | Budget left: {:.0}% | {} ---",
        state.score,
        state.max_score,
        state.regions.len(),
        state.remaining_capacity_fraction * 100.0,
        match state.phase {
            GamePhase::Active => "active",
            GamePhase::GameOver => "GAME OVER",
        }
    );
}

/// Display every region and landmark
fn display_detailed_status(game: &GameController) {
    let state = game.state();
    println!();
    println!("=== Regions ===");
    for region in &state.regions {
        println!(
            "  {:<10} {:?} area {:.3} ({} vertices)",
            region.id.to_string(),
            region.classification,
            region.area(),
            region.vertices.len()
        );
    }
    println!(
        "Stronghold: center ({:.3}, {:.3}) radius {:.3}",
        state.stronghold.center.x, state.stronghold.center.y, state.stronghold.radius
    );
    println!(
        "Budget: {:.3} of {:.3} used",
        state.consumed, state.capacity
    );

    println!("=== Landmarks ===");
    for landmark in game.landmarks() {
        let taken = state.captured_landmarks.contains(&landmark.name);
        println!(
            "  [{}] {}",
            if taken { "x" } else { " " },
            landmark.name
        );
    }
}
