//! Territory setup: boundary, capital and landmarks, loaded from TOML scenarios

use geo::Area;
use geo_types::{Coord, LineString, Polygon};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::landmark::Landmark;
use crate::core::error::{EngineError, Result};
use crate::geometry::kernel::cross;
use crate::geometry::{point_in_polygon, GeoPoint};

/// Everything fixed for the lifetime of a game
#[derive(Debug, Clone, PartialEq)]
pub struct TerritorySetup {
    pub name: String,
    /// Ordered geographic vertex loop, not closed
    pub boundary: Vec<GeoPoint>,
    pub capital: GeoPoint,
    pub landmarks: Vec<Landmark>,
}

/// On-disk scenario layout
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    name: String,
    capital: [f64; 2],
    boundary: Vec<[f64; 2]>,
    #[serde(default)]
    landmarks: Vec<Landmark>,
}

impl TerritorySetup {
    pub fn new(boundary: Vec<GeoPoint>, capital: GeoPoint, landmarks: Vec<Landmark>) -> Self {
        Self {
            name: String::new(),
            boundary,
            capital,
            landmarks,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Parse a scenario from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let file: ScenarioFile = toml::from_str(contents)?;
        let mut boundary: Vec<GeoPoint> = file.boundary.into_iter().map(GeoPoint::from).collect();
        // Accept explicitly closed rings
        if boundary.len() > 3 && boundary.first() == boundary.last() {
            boundary.pop();
        }
        Ok(Self {
            name: file.name,
            boundary,
            capital: GeoPoint::from(file.capital),
            landmarks: file.landmarks,
        })
    }

    /// Load a scenario TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&contents)
    }

    /// Load `data/scenarios/{name}.toml`
    pub fn load_named(name: &str) -> Result<Self> {
        Self::load(scenario_path(name))
    }

    /// Check the boundary is a usable simple polygon holding the capital
    pub fn validate(&self) -> Result<()> {
        validate_boundary(&self.boundary)?;
        if !self.capital.is_finite() || self.landmarks.iter().any(|l| !l.position().is_finite()) {
            return Err(EngineError::NonFiniteCoordinate);
        }
        if !point_in_polygon(self.capital, &self.boundary) {
            return Err(EngineError::CapitalOutsideTerritory);
        }
        Ok(())
    }
}

/// Get path to a bundled scenario file
pub fn scenario_path(name: &str) -> PathBuf {
    PathBuf::from("data/scenarios").join(format!("{}.toml", name))
}

/// Validate a boundary ring: enough vertices, finite, simple, with area
pub fn validate_boundary(boundary: &[GeoPoint]) -> Result<()> {
    if boundary.len() < 3 {
        return Err(EngineError::InsufficientVertices {
            count: boundary.len(),
            minimum: 3,
        });
    }
    if boundary.iter().any(|p| !p.is_finite()) {
        return Err(EngineError::NonFiniteCoordinate);
    }
    if is_self_intersecting(boundary) {
        return Err(EngineError::SelfIntersecting);
    }

    let ring: LineString<f64> = boundary.iter().map(|p| Coord::from(*p)).collect();
    if Polygon::new(ring, vec![]).unsigned_area() <= 0.0 {
        return Err(EngineError::ZeroArea);
    }
    Ok(())
}

/// Check if ring edges properly cross each other (adjacent edges excluded)
fn is_self_intersecting(ring: &[GeoPoint]) -> bool {
    let n = ring.len();
    if n < 4 {
        return false;
    }

    for i in 0..n {
        let a1 = ring[i];
        let a2 = ring[(i + 1) % n];

        for j in (i + 2)..n {
            // Last edge is adjacent to the first
            if i == 0 && j == n - 1 {
                continue;
            }
            let b1 = ring[j];
            let b2 = ring[(j + 1) % n];
            if segments_cross(a1, a2, b1, b2) {
                return true;
            }
        }
    }
    false
}

/// Proper crossing test, touching endpoints do not count
fn segments_cross(a1: GeoPoint, a2: GeoPoint, b1: GeoPoint, b2: GeoPoint) -> bool {
    let d1 = cross(b1, b2, a1);
    let d2 = cross(b1, b2, a2);
    let d3 = cross(a1, a2, b1);
    let d4 = cross(a1, a2, b2);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
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

    #[test]
    fn test_valid_square_setup() {
        let setup = TerritorySetup::new(square(), GeoPoint::new(5.0, 5.0), vec![]);
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_too_few_vertices() {
        let err = validate_boundary(&square()[..2]).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InsufficientVertices {
                count: 2,
                minimum: 3
            }
        ));
    }

    #[test]
    fn test_bowtie_is_self_intersecting() {
        let bowtie = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 10.0),
            GeoPoint::new(10.0, 0.0),
            GeoPoint::new(0.0, 10.0),
        ];
        assert!(matches!(
            validate_boundary(&bowtie),
            Err(EngineError::SelfIntersecting)
        ));
    }

    #[test]
    fn test_flat_boundary_has_no_area() {
        let flat = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(5.0, 0.0),
            GeoPoint::new(10.0, 0.0),
        ];
        assert!(matches!(validate_boundary(&flat), Err(EngineError::ZeroArea)));
    }

    #[test]
    fn test_capital_outside() {
        let setup = TerritorySetup::new(square(), GeoPoint::new(15.0, 5.0), vec![]);
        assert!(matches!(
            setup.validate(),
            Err(EngineError::CapitalOutsideTerritory)
        ));
    }

    #[test]
    fn test_scenario_from_toml() {
        let toml_text = r#"
            name = "Plateau"
            capital = [5.0, 1.0]
            boundary = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]]

            [[landmarks]]
            place = "Watchtower"
            latitude = 8.0
            longitude = 2.0
        "#;
        let setup = TerritorySetup::from_toml(toml_text).unwrap();
        assert_eq!(setup.name, "Plateau");
        assert_eq!(setup.boundary.len(), 4);
        assert_eq!(setup.capital, GeoPoint::new(5.0, 1.0));
        assert_eq!(setup.landmarks[0].position(), GeoPoint::new(2.0, 8.0));
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_load_bundled_square() {
        let setup = TerritorySetup::load_named("square").expect("Should load square scenario");
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn test_load_bundled_algeria() {
        let setup = TerritorySetup::load_named("algeria").expect("Should load algeria scenario");
        assert!(setup.validate().is_ok());
        assert!(!setup.landmarks.is_empty());
    }
}
