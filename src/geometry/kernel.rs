//! Geometry kernel: intersection, containment, area, distance
//!
//! Pure functions over frame-tagged points. None of them allocate or keep state,
//! so they are safe to call at pointer-move frequency.

use super::point::{Frame, Point, Segment};

/// Default threshold under which two segments count as parallel
pub const PARALLEL_EPSILON: f64 = 1e-10;

/// 2D cross product of (b - a) and (c - a)
pub fn cross<F: Frame>(a: Point<F>, b: Point<F>, c: Point<F>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Intersection point of segments `a1-a2` and `b1-b2`
///
/// Both segment parameters must lie in `[0, 1]`. Parallel and collinear
/// segments report no intersection.
pub fn segment_intersect<F: Frame>(
    a1: Point<F>,
    a2: Point<F>,
    b1: Point<F>,
    b2: Point<F>,
    epsilon: f64,
) -> Option<Point<F>> {
    let rx = a2.x - a1.x;
    let ry = a2.y - a1.y;
    let sx = b2.x - b1.x;
    let sy = b2.y - b1.y;

    let denominator = rx * sy - ry * sx;
    if denominator.abs() < epsilon {
        return None;
    }

    let qx = b1.x - a1.x;
    let qy = b1.y - a1.y;
    let t = (qx * sy - qy * sx) / denominator;
    let u = (qx * ry - qy * rx) / denominator;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1.lerp(&a2, t))
    } else {
        None
    }
}

/// Ray-casting parity test
///
/// Points exactly on an edge may land on either side, but the answer for a
/// given point and polygon never changes.
pub fn point_in_polygon<F: Frame>(p: Point<F>, polygon: &[Point<F>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = polygon[i];
        let vj = polygon[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Signed shoelace area; positive for counter-clockwise rings
pub fn signed_area<F: Frame>(polygon: &[Point<F>]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        sum += a.x * b.y - b.x * a.y;
    }
    sum / 2.0
}

/// Unsigned polygon area; zero for fewer than three vertices
pub fn polygon_area<F: Frame>(polygon: &[Point<F>]) -> f64 {
    signed_area(polygon).abs()
}

/// Closest point of `segment` to `p`
pub fn closest_point_on_segment<F: Frame>(segment: &Segment<F>, p: Point<F>) -> Point<F> {
    let dx = segment.end.x - segment.start.x;
    let dy = segment.end.y - segment.start.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return segment.start;
    }
    let t = ((p.x - segment.start.x) * dx + (p.y - segment.start.y) * dy) / length_sq;
    segment.start.lerp(&segment.end, t.clamp(0.0, 1.0))
}

/// Distance from `center` to the nearest point of `segment`
pub fn segment_to_circle_distance<F: Frame>(segment: &Segment<F>, center: Point<F>) -> f64 {
    closest_point_on_segment(segment, center).distance(&center)
}

/// True when `segment` touches or enters the circle
pub fn segment_circle_intersects<F: Frame>(
    segment: &Segment<F>,
    center: Point<F>,
    radius: f64,
) -> bool {
    segment_to_circle_distance(segment, center) <= radius
}
