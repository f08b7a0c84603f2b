//! Candidate lines drawn by the player

use serde::{Deserialize, Serialize};

use crate::core::types::LineId;
use crate::geometry::{ViewPoint, ViewSegment};

/// A line under evaluation, in view coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateLine {
    pub id: LineId,
    pub segment: ViewSegment,
}

impl CandidateLine {
    pub fn new(start: ViewPoint, end: ViewPoint) -> Self {
        Self {
            id: LineId::new(),
            segment: ViewSegment::new(start, end),
        }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(ViewPoint::new(x1, y1), ViewPoint::new(x2, y2))
    }

    /// Move the end point while dragging; the id stays the same
    pub fn drag_end(&mut self, to: ViewPoint) {
        self.segment.end = to;
    }

    /// Move the start point while dragging; the id stays the same
    pub fn drag_start(&mut self, to: ViewPoint) {
        self.segment.start = to;
    }
}
