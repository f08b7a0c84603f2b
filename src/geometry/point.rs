//! Frame-tagged points and segments
//!
//! Every coordinate carries the frame it was measured in. Geographic values
//! (longitude/latitude) and view values (pixels after pan and zoom) are distinct
//! types, so budget and scoring code cannot silently mix them. The only way
//! across is [`crate::geometry::ViewTransform`].

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;

/// Marker trait for coordinate frames
pub trait Frame: Copy + Clone + Debug + Default + PartialEq + Send + Sync + 'static {
    const NAME: &'static str;
}

/// Fixed geographic frame: `x` is longitude, `y` is latitude
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Geo;

/// Mutable view frame, in host surface units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct View;

impl Frame for Geo {
    const NAME: &'static str = "geo";
}

impl Frame for View {
    const NAME: &'static str = "view";
}

/// 2D point in frame `F`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point<F: Frame> {
    pub x: f64,
    pub y: f64,
    #[serde(skip)]
    frame: PhantomData<F>,
}

pub type GeoPoint = Point<Geo>;
pub type ViewPoint = Point<View>;

impl<F: Frame> Point<F> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            frame: PhantomData,
        }
    }

    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Point at parameter `t` along the way from `self` to `other`
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl<F: Frame> From<[f64; 2]> for Point<F> {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl<F: Frame> From<(f64, f64)> for Point<F> {
    fn from(v: (f64, f64)) -> Self {
        Self::new(v.0, v.1)
    }
}

impl From<GeoPoint> for geo_types::Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        geo_types::coord! { x: p.x, y: p.y }
    }
}

/// Straight segment between two points of the same frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Segment<F: Frame> {
    pub start: Point<F>,
    pub end: Point<F>,
}

pub type GeoSegment = Segment<Geo>;
pub type ViewSegment = Segment<View>;

impl<F: Frame> Segment<F> {
    pub fn new(start: Point<F>, end: Point<F>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(&self.end)
    }

    /// True when both endpoints coincide within `epsilon`
    pub fn is_degenerate(&self, epsilon: f64) -> bool {
        self.length() <= epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}
