//! Cutting budget
//!
//! Capacity is measured in geographic units so panning and zooming never make
//! a cut cheaper. Only the stretch of a line lying over territory is charged.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::geometry::{GeoPoint, GeoSegment};
use crate::territory::{chord_inside, Partition, Tolerance};

/// Distance between the westmost and eastmost boundary vertices
///
/// Ties keep the first vertex found.
pub fn west_east_span(boundary: &[GeoPoint]) -> f64 {
    let mut west: Option<GeoPoint> = None;
    let mut east: Option<GeoPoint> = None;
    for p in boundary {
        if west.map_or(true, |w| p.x < w.x) {
            west = Some(*p);
        }
        if east.map_or(true, |e| p.x > e.x) {
            east = Some(*p);
        }
    }
    match (west, east) {
        (Some(w), Some(e)) => w.distance(&e),
        _ => 0.0,
    }
}

/// Territory length covered by `line`
///
/// For each region with at least two crossings, the distance from the crossing
/// nearest the line start to the farthest one. A pair of crossings whose chord
/// lies outside the region covers no territory and costs nothing.
pub fn slicing_length(partition: &Partition, line: &GeoSegment, tol: Tolerance) -> f64 {
    partition
        .crossings(line, tol)
        .iter()
        .filter(|(_, crossings)| crossings.len() >= 2)
        .filter(|(id, crossings)| {
            crossings.len() > 2
                || partition
                    .region(*id)
                    .map_or(false, |r| chord_inside(&r.vertices, crossings[0], crossings[1], tol.merge))
        })
        .filter_map(|(_, crossings)| {
            let nearest = crossings
                .iter()
                .min_by_key(|c| OrderedFloat(c.point.distance(&line.start)))?;
            let farthest = crossings
                .iter()
                .max_by_key(|c| OrderedFloat(c.point.distance(&line.start)))?;
            Some(nearest.point.distance(&farthest.point))
        })
        .sum()
}

/// Result of charging a cut
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetDecision {
    Accepted { cost: f64 },
    Exceeded { required: f64, remaining: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetTracker {
    capacity: f64,
    consumed: f64,
    tolerance: f64,
}

impl BudgetTracker {
    pub fn new(capacity: f64, tolerance: f64) -> Self {
        Self {
            capacity: capacity.max(0.0),
            consumed: 0.0,
            tolerance,
        }
    }

    /// Capacity of `multiplier` times the territory's west-east span
    pub fn for_boundary(boundary: &[GeoPoint], multiplier: f64, tolerance: f64) -> Self {
        Self::new(west_east_span(boundary) * multiplier, tolerance)
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn consumed(&self) -> f64 {
        self.consumed
    }

    pub fn remaining(&self) -> f64 {
        (self.capacity - self.consumed).max(0.0)
    }

    /// Remaining share of the capacity in `[0, 1]`
    pub fn remaining_fraction(&self) -> f64 {
        if self.capacity <= 0.0 {
            return 0.0;
        }
        (self.remaining() / self.capacity).clamp(0.0, 1.0)
    }

    pub fn can_afford(&self, length: f64) -> bool {
        self.consumed + length <= self.capacity + self.tolerance
    }

    pub fn is_exhausted(&self) -> bool {
        self.capacity - self.consumed <= self.tolerance
    }

    /// Charge `length`, or leave the budget untouched if it does not fit
    pub fn try_consume(&mut self, length: f64) -> BudgetDecision {
        if !self.can_afford(length) {
            return BudgetDecision::Exceeded {
                required: length,
                remaining: self.remaining(),
            };
        }
        self.consumed += length.max(0.0);
        BudgetDecision::Accepted { cost: length }
    }

    pub fn reset(&mut self) {
        self.consumed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 0.0),
            GeoPoint::new(10.0, 10.0),
            GeoPoint::new(0.0, 10.0),
        ]
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> GeoSegment {
        GeoSegment::new(GeoPoint::new(x1, y1), GeoPoint::new(x2, y2))
    }

    #[test]
    fn test_west_east_span() {
        assert!((west_east_span(&square()) - 10.0).abs() < 1e-12);
        let diamond = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(4.0, -3.0),
            GeoPoint::new(8.0, 6.0),
            GeoPoint::new(4.0, 3.0),
        ];
        assert!((west_east_span(&diamond) - 10.0).abs() < 1e-12);
        assert_eq!(west_east_span(&[]), 0.0);
    }

    #[test]
    fn test_capacity_from_boundary() {
        let budget = BudgetTracker::for_boundary(&square(), 1.7, 1e-9);
        assert!((budget.capacity() - 17.0).abs() < 1e-12);
        assert_eq!(budget.remaining_fraction(), 1.0);
    }

    #[test]
    fn test_only_territory_length_is_charged() {
        let partition = Partition::new(square());
        // 30 units long, 10 of them over the square
        let length = slicing_length(&partition, &line(-10.0, 5.0, 20.0, 5.0), Tolerance::default());
        assert!((length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_line_ending_inside_costs_nothing() {
        let partition = Partition::new(square());
        let length = slicing_length(&partition, &line(-10.0, 5.0, 5.0, 5.0), Tolerance::default());
        assert_eq!(length, 0.0);
    }

    #[test]
    fn test_chord_across_a_notch_costs_nothing() {
        let u = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(6.0, 0.0),
            GeoPoint::new(6.0, 6.0),
            GeoPoint::new(4.0, 6.0),
            GeoPoint::new(4.0, 2.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(2.0, 6.0),
            GeoPoint::new(0.0, 6.0),
        ];
        let partition = Partition::new(u);
        // Starts in the left arm, ends in the right: the only covered stretch is the gap
        let length = slicing_length(&partition, &line(1.0, 4.0, 5.0, 4.0), Tolerance::default());
        assert_eq!(length, 0.0);
    }

    #[test]
    fn test_length_sums_over_regions() {
        let mut partition = Partition::new(square());
        partition.apply_cut(&line(5.0, -1.0, 5.0, 11.0), GeoPoint::new(1.0, 1.0), Tolerance::default());
        let length = slicing_length(&partition, &line(-1.0, 8.0, 11.0, 8.0), Tolerance::default());
        assert!((length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_exceeding_leaves_state() {
        let mut budget = BudgetTracker::new(10.0, 1e-9);
        assert_eq!(budget.try_consume(6.0), BudgetDecision::Accepted { cost: 6.0 });
        let decision = budget.try_consume(5.0);
        assert_eq!(
            decision,
            BudgetDecision::Exceeded {
                required: 5.0,
                remaining: 4.0
            }
        );
        assert_eq!(budget.consumed(), 6.0);
        assert!(!budget.is_exhausted());
    }

    #[test]
    fn test_exact_fill_exhausts() {
        let mut budget = BudgetTracker::new(10.0, 1e-9);
        budget.try_consume(4.0);
        assert!(matches!(budget.try_consume(6.0), BudgetDecision::Accepted { .. }));
        assert!(budget.is_exhausted());
        assert_eq!(budget.remaining_fraction(), 0.0);
        budget.reset();
        assert_eq!(budget.consumed(), 0.0);
    }
}
