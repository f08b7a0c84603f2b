//! Geographic ⇄ view coordinate transform
//!
//! Two stages, applied in order:
//! 1. projection: `scale * geo + translate`, fitted once to the host surface
//! 2. camera: `zoom * projected + pan`, changed by the player
//!
//! Changing either stage is a rendering concern. The engine keeps regions in
//! the geographic frame and only converts incoming lines, so a new transform
//! never disturbs region, budget or score state.

use geo::BoundingRect;
use geo_types::{Coord, LineString};
use serde::{Deserialize, Serialize};

use super::point::{GeoPoint, GeoSegment, ViewPoint, ViewSegment};
use crate::core::error::{EngineError, Result};

/// Smallest camera zoom relative to the fitted projection
pub const MIN_ZOOM: f64 = 0.1;
/// Largest camera zoom relative to the fitted projection
pub const MAX_ZOOM: f64 = 5.0;
/// Relative slack allowed between the x and y scale magnitudes
const ANISOTROPY_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    /// View coordinates equal geographic coordinates
    pub fn identity() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Projection with explicit scale and translation, camera at rest
    pub fn new(scale_x: f64, scale_y: f64, translate_x: f64, translate_y: f64) -> Result<Self> {
        let transform = Self {
            scale_x,
            scale_y,
            translate_x,
            translate_y,
            ..Self::identity()
        };
        transform.validate()?;
        Ok(transform)
    }

    /// North-up projection fitting `boundary` into a `width` x `height`
    /// surface with `padding` on every side, centered.
    pub fn fit_bounds(boundary: &[GeoPoint], width: f64, height: f64, padding: f64) -> Result<Self> {
        let ring: LineString<f64> = boundary.iter().map(|p| Coord::from(*p)).collect();
        let rect = ring
            .bounding_rect()
            .ok_or_else(|| EngineError::InvalidTransform("boundary has no extent".into()))?;

        let usable_w = width - 2.0 * padding;
        let usable_h = height - 2.0 * padding;
        if usable_w <= 0.0 || usable_h <= 0.0 {
            return Err(EngineError::InvalidTransform(format!(
                "viewport {}x{} leaves no room inside padding {}",
                width, height, padding
            )));
        }
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(EngineError::InvalidTransform(
                "boundary is flat along one axis".into(),
            ));
        }

        let scale = (usable_w / rect.width()).min(usable_h / rect.height());
        let slack_x = (usable_w - rect.width() * scale) / 2.0;
        let slack_y = (usable_h - rect.height() * scale) / 2.0;

        Self::new(
            scale,
            -scale, // latitude grows north, view y grows down
            padding + slack_x - rect.min().x * scale,
            padding + slack_y + rect.max().y * scale,
        )
    }

    /// Reject zero or non-finite parameters, which would make the transform
    /// impossible to invert, and unequal axis scales.
    ///
    /// Distances in the two frames must differ by one factor only, so a
    /// stronghold circle in geographic units stays a circle on screen.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.scale_x,
            self.scale_y,
            self.translate_x,
            self.translate_y,
            self.zoom,
            self.pan_x,
            self.pan_y,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::InvalidTransform("non-finite parameter".into()));
        }
        if self.scale_x == 0.0 || self.scale_y == 0.0 || self.zoom <= 0.0 {
            return Err(EngineError::InvalidTransform(format!(
                "scale ({}, {}) and zoom {} must be non-zero",
                self.scale_x, self.scale_y, self.zoom
            )));
        }
        let (sx, sy) = (self.scale_x.abs(), self.scale_y.abs());
        if (sx - sy).abs() > ANISOTROPY_TOLERANCE * sx.max(sy) {
            return Err(EngineError::InvalidTransform(format!(
                "axis scales |{}| and |{}| differ",
                self.scale_x, self.scale_y
            )));
        }
        Ok(())
    }

    pub fn to_view(&self, p: GeoPoint) -> ViewPoint {
        let px = p.x * self.scale_x + self.translate_x;
        let py = p.y * self.scale_y + self.translate_y;
        ViewPoint::new(px * self.zoom + self.pan_x, py * self.zoom + self.pan_y)
    }

    pub fn to_geo(&self, p: ViewPoint) -> GeoPoint {
        let px = (p.x - self.pan_x) / self.zoom;
        let py = (p.y - self.pan_y) / self.zoom;
        GeoPoint::new(
            (px - self.translate_x) / self.scale_x,
            (py - self.translate_y) / self.scale_y,
        )
    }

    pub fn segment_to_geo(&self, segment: &ViewSegment) -> GeoSegment {
        GeoSegment::new(self.to_geo(segment.start), self.to_geo(segment.end))
    }

    pub fn segment_to_view(&self, segment: &GeoSegment) -> ViewSegment {
        ViewSegment::new(self.to_view(segment.start), self.to_view(segment.end))
    }

    /// Shift the camera by a delta in view units
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Zoom by `factor` while keeping the point under `anchor` fixed.
    /// Returns false when the zoom was already at its limit.
    pub fn zoom_toward(&mut self, anchor: ViewPoint, factor: f64) -> bool {
        let new_zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if new_zoom == self.zoom {
            return false;
        }
        let fixed = self.to_geo(anchor);
        self.zoom = new_zoom;
        let moved = self.to_view(fixed);
        self.pan_x += anchor.x - moved.x;
        self.pan_y += anchor.y - moved.y;
        true
    }

    /// Drop camera zoom and pan, keep the fitted projection
    pub fn reset_view(&mut self) {
        self.zoom = 1.0;
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}
