//! Stronghold and line legality
//!
//! The stronghold is a circle around the capital covering a fixed fraction of
//! the area the regime still owns. It is derived from the partition on every
//! query and never stored, so it shrinks as soon as territory is captured.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::core::types::RegionId;
use crate::geometry::{segment_circle_intersects, segment_to_circle_distance, GeoPoint, GeoSegment};
use crate::territory::{Classification, Partition, Tolerance};

/// Protected circle around the capital
///
/// Held in geographic units. View transforms scale both axes equally, so the
/// same circle measured on screen gives the same legality answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stronghold {
    pub center: GeoPoint,
    pub radius: f64,
}

impl Stronghold {
    /// Circle whose area is `fraction` of `regime_area`
    pub fn from_regime_area(center: GeoPoint, regime_area: f64, fraction: f64) -> Self {
        Self {
            center,
            radius: ((regime_area * fraction) / PI).max(0.0).sqrt(),
        }
    }

    /// Stronghold for the current state of `partition`
    pub fn for_partition(partition: &Partition, capital: GeoPoint, fraction: f64) -> Self {
        Self::from_regime_area(capital, partition.area_of(Classification::RegimeOwned), fraction)
    }

    pub fn distance_to(&self, line: &GeoSegment) -> f64 {
        segment_to_circle_distance(line, self.center)
    }

    pub fn blocks(&self, line: &GeoSegment) -> bool {
        segment_circle_intersects(line, self.center, self.radius)
    }
}

/// Why a candidate line may not be cut
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The line touches the protected circle
    Stronghold { distance: f64, radius: f64 },
    /// The line crosses one region's boundary more than twice
    TooManyCrossings { region: RegionId, crossings: usize },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::Stronghold { distance, radius } => write!(
                f,
                "line passes {:.3} from the capital, inside the stronghold radius {:.3}",
                distance, radius
            ),
            Violation::TooManyCrossings { region, crossings } => {
                write!(f, "line crosses {} boundary {} times", region, crossings)
            }
        }
    }
}

/// First rule `line` breaks against the current partition, if any
///
/// Read-only: safe to call on every pointer move while a line is dragged.
pub fn find_violation(
    partition: &Partition,
    stronghold: &Stronghold,
    line: &GeoSegment,
    tol: Tolerance,
) -> Option<Violation> {
    if stronghold.blocks(line) {
        return Some(Violation::Stronghold {
            distance: stronghold.distance_to(line),
            radius: stronghold.radius,
        });
    }

    partition
        .crossings(line, tol)
        .into_iter()
        .find(|(_, crossings)| crossings.len() > 2)
        .map(|(region, crossings)| Violation::TooManyCrossings {
            region,
            crossings: crossings.len(),
        })
}
