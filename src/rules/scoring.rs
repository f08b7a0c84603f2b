//! Scoring: captured area plus captured landmarks

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::territory::{Classification, Landmark, Region};

/// How a score was made up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Captured share of the territory, in percent
    pub captured_percent: f64,
    pub area_points: u32,
    pub landmark_points: u32,
    /// Names of landmarks inside captured regions
    pub captured_landmarks: Vec<String>,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u32 {
        self.area_points + self.landmark_points
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreModel {
    total_area: f64,
    landmark_count: usize,
    points_per_percent: u32,
    points_per_landmark: u32,
}

impl ScoreModel {
    /// `total_area` is the territory area at setup; cuts never change it
    pub fn new(total_area: f64, landmark_count: usize, config: &EngineConfig) -> Self {
        Self {
            total_area,
            landmark_count,
            points_per_percent: config.points_per_percent,
            points_per_landmark: config.points_per_landmark,
        }
    }

    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    /// Score for capturing everything: the whole area and every landmark
    pub fn max_score(&self) -> u32 {
        100 * self.points_per_percent + self.points_per_landmark * self.landmark_count as u32
    }

    pub fn evaluate(&self, regions: &[Region], landmarks: &[Landmark]) -> ScoreBreakdown {
        let captured_area: f64 = regions
            .iter()
            .filter(|r| r.classification == Classification::Captured)
            .map(Region::area)
            .sum();

        let captured_percent = if self.total_area > 0.0 {
            captured_area / self.total_area * 100.0
        } else {
            0.0
        };
        let area_points = (captured_percent * f64::from(self.points_per_percent))
            .round()
            .max(0.0) as u32;

        let captured_landmarks: Vec<String> = landmarks
            .iter()
            .filter(|l| {
                let at = l.position();
                regions.iter().any(|r| r.is_captured() && r.contains(at))
            })
            .map(|l| l.name.clone())
            .collect();
        let landmark_points = self.points_per_landmark * captured_landmarks.len() as u32;

        ScoreBreakdown {
            captured_percent,
            area_points,
            landmark_points,
            captured_landmarks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::RegionId;
    use crate::geometry::GeoPoint;

    fn rect(id: u32, x0: f64, x1: f64, classification: Classification) -> Region {
        Region::new(
            RegionId(id),
            vec![
                GeoPoint::new(x0, 0.0),
                GeoPoint::new(x1, 0.0),
                GeoPoint::new(x1, 10.0),
                GeoPoint::new(x0, 10.0),
            ],
            classification,
        )
    }

    #[test]
    fn test_max_score() {
        let model = ScoreModel::new(100.0, 3, &EngineConfig::default());
        assert_eq!(model.max_score(), 650);
    }

    #[test]
    fn test_untouched_territory_scores_zero() {
        let model = ScoreModel::new(100.0, 0, &EngineConfig::default());
        let regions = vec![rect(1, 0.0, 10.0, Classification::RegimeOwned)];
        assert_eq!(model.evaluate(&regions, &[]).total(), 0);
    }

    #[test]
    fn test_area_points_round() {
        let model = ScoreModel::new(100.0, 0, &EngineConfig::default());
        // 33.37% captured -> 166.85 points -> 167
        let regions = vec![
            rect(1, 0.0, 6.663, Classification::RegimeOwned),
            rect(2, 6.663, 10.0, Classification::Captured),
        ];
        let breakdown = model.evaluate(&regions, &[]);
        assert_eq!(breakdown.area_points, 167);
    }

    #[test]
    fn test_landmarks_count_only_when_captured() {
        let model = ScoreModel::new(100.0, 2, &EngineConfig::default());
        let regions = vec![
            rect(1, 0.0, 5.0, Classification::RegimeOwned),
            rect(2, 5.0, 10.0, Classification::Captured),
        ];
        let landmarks = vec![
            Landmark::new("Held", GeoPoint::new(2.0, 5.0)),
            Landmark::new("Taken", GeoPoint::new(7.0, 5.0)),
        ];
        let breakdown = model.evaluate(&regions, &landmarks);
        assert_eq!(breakdown.area_points, 250);
        assert_eq!(breakdown.landmark_points, 50);
        assert_eq!(breakdown.captured_landmarks, vec!["Taken".to_string()]);
        assert_eq!(breakdown.total(), 300);
    }

    #[test]
    fn test_zero_total_area() {
        let model = ScoreModel::new(0.0, 0, &EngineConfig::default());
        assert_eq!(model.evaluate(&[], &[]).area_points, 0);
    }
}
