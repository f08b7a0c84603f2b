//! Frame-tagged geometry: points, the pure kernel, ring walks and the view transform

pub mod kernel;
pub mod point;
pub mod ring;
pub mod transform;

pub use kernel::{
    point_in_polygon, polygon_area, segment_circle_intersects, segment_intersect,
    segment_to_circle_distance,
};
pub use point::{Frame, Geo, GeoPoint, GeoSegment, Point, Segment, View, ViewPoint, ViewSegment};
pub use ring::RingWalk;
pub use transform::ViewTransform;
