//! Landmarks: named places that score when captured
//!
//! The field names follow the landmark list format of the web client
//! (`place`, `latitude`, `longitude`, `description`, `icon`), so the same JSON
//! can feed the engine unchanged.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::geometry::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    #[serde(rename = "place")]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Landmark {
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            latitude: position.y,
            longitude: position.x,
            description: None,
            icon: None,
        }
    }

    /// Geographic position (`x` = longitude, `y` = latitude)
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}

/// Parse a JSON array of landmarks
pub fn parse_landmarks_json(json: &str) -> Result<Vec<Landmark>> {
    Ok(serde_json::from_str(json)?)
}

/// Load a JSON array of landmarks from disk
pub fn load_landmarks_json(path: impl AsRef<Path>) -> Result<Vec<Landmark>> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_landmarks_json(&contents)
}
