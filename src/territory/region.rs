//! Regions of the territory partition

use serde::{Deserialize, Serialize};

use crate::core::types::RegionId;
use crate::geometry::{point_in_polygon, polygon_area, GeoPoint, ViewPoint, ViewTransform};

/// Who holds a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Still held by the regime; the piece with the capital
    RegimeOwned,
    /// Cut away from the capital by the player
    Captured,
}

/// One polygon of the partition, stored in the geographic frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: RegionId,
    pub vertices: Vec<GeoPoint>,
    pub classification: Classification,
}

impl Region {
    pub fn new(id: RegionId, vertices: Vec<GeoPoint>, classification: Classification) -> Self {
        Self {
            id,
            vertices,
            classification,
        }
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    pub fn contains(&self, p: GeoPoint) -> bool {
        point_in_polygon(p, &self.vertices)
    }

    pub fn is_captured(&self) -> bool {
        self.classification == Classification::Captured
    }

    /// Vertices mapped into the view frame, for drawing
    pub fn view_vertices(&self, transform: &ViewTransform) -> Vec<ViewPoint> {
        self.vertices.iter().map(|p| transform.to_view(*p)).collect()
    }
}
