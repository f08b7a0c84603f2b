//! Region partition and the split-and-recolor transaction
//!
//! The only mutation is "replace one region with two regions that exactly tile
//! it", so the partition always covers the whole territory exactly once.

use crate::core::config::EngineConfig;
use crate::core::types::RegionId;
use crate::geometry::kernel::cross;
use crate::geometry::{
    point_in_polygon, polygon_area, segment_intersect, GeoPoint, GeoSegment, RingWalk,
};

use super::region::{Classification, Region};

/// Tolerances used by crossing detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Denominator threshold for parallel segments
    pub parallel: f64,
    /// Distance under which two crossings are the same point
    pub merge: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

impl From<&EngineConfig> for Tolerance {
    fn from(config: &EngineConfig) -> Self {
        Self {
            parallel: config.parallel_epsilon,
            merge: config.merge_epsilon,
        }
    }
}

/// Point where a line crosses edge `edge` (from vertex `edge` to `edge + 1`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub edge: usize,
    pub point: GeoPoint,
}

/// Every point where `line` meets the boundary of `polygon`, in edge order
///
/// A line passing through a vertex meets both adjacent edges there and counts
/// once. A line that only touches a vertex, with both neighbours on the same
/// side, counts once per edge: it enters and leaves at the same point.
pub fn boundary_crossings(polygon: &[GeoPoint], line: &GeoSegment, tol: Tolerance) -> Vec<Crossing> {
    let n = polygon.len();
    let mut crossings: Vec<Crossing> = Vec::new();
    if n < 3 {
        return crossings;
    }
    let mut vertices_hit: Vec<usize> = Vec::new();

    for edge in 0..n {
        let a = polygon[edge];
        let b = polygon[(edge + 1) % n];
        let Some(point) = segment_intersect(line.start, line.end, a, b, tol.parallel) else {
            continue;
        };

        let vertex = if point.distance(&a) <= tol.merge {
            Some(edge)
        } else if point.distance(&b) <= tol.merge {
            Some((edge + 1) % n)
        } else {
            None
        };

        let Some(v) = vertex else {
            crossings.push(Crossing { edge, point });
            continue;
        };
        if vertices_hit.contains(&v) {
            continue;
        }
        vertices_hit.push(v);

        // Vertex hits are filed under the edge ending at that vertex
        let incoming = (v + n - 1) % n;
        let at = Crossing {
            edge: incoming,
            point: polygon[v],
        };
        let side_prev = cross(line.start, line.end, polygon[incoming]);
        let side_next = cross(line.start, line.end, polygon[(v + 1) % n]);
        crossings.push(at);
        if side_prev * side_next > 0.0 {
            crossings.push(Crossing { edge: v, ..at });
        }
    }

    crossings.sort_by_key(|c| c.edge);
    crossings
}

/// True when the chord between two crossings runs through the polygon interior
///
/// With exactly two crossings the chord meets no other edge, so it lies wholly
/// inside or wholly outside; the midpoint decides. A line that starts and ends
/// inside after leaving and re-entering has its chord outside.
pub fn chord_inside(polygon: &[GeoPoint], first: Crossing, second: Crossing, merge: f64) -> bool {
    if first.point.distance(&second.point) <= merge {
        return false;
    }
    point_in_polygon(first.point.lerp(&second.point, 0.5), polygon)
}

/// One half of a split region
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub vertices: Vec<GeoPoint>,
    pub classification: Classification,
}

fn push_distinct(ring: &mut Vec<GeoPoint>, p: GeoPoint, merge: f64) {
    if ring.last().map_or(true, |last| last.distance(&p) > merge) {
        ring.push(p);
    }
}

/// Cut a polygon along the chord between two crossings
///
/// Piece A walks from the first crossing forward to the second, piece B walks
/// the rest of the ring back to the first. Returns `None` if either piece
/// collapses to nothing, as happens for a line running along an edge.
pub fn split_polygon(
    vertices: &[GeoPoint],
    first: Crossing,
    second: Crossing,
    merge: f64,
) -> Option<(Vec<GeoPoint>, Vec<GeoPoint>)> {
    let (first, second) = if first.edge <= second.edge {
        (first, second)
    } else {
        (second, first)
    };
    if first.edge == second.edge {
        return None;
    }
    let n = vertices.len();

    let mut a = vec![first.point];
    for i in RingWalk::new(n, first.edge + 1, second.edge) {
        push_distinct(&mut a, vertices[i], merge);
    }
    push_distinct(&mut a, second.point, merge);

    let mut b = vec![second.point];
    for i in RingWalk::new(n, second.edge + 1, first.edge) {
        push_distinct(&mut b, vertices[i], merge);
    }
    push_distinct(&mut b, first.point, merge);

    let collapsed = |ring: &[GeoPoint]| ring.len() < 3 || polygon_area(ring) <= merge;
    if collapsed(&a) || collapsed(&b) {
        return None;
    }
    Some((a, b))
}

/// Split `region` along `line` and recolor the pieces around `capital`
///
/// The line must cross the boundary exactly twice with the chord between the
/// crossings inside the region; anything else leaves the region alone. The piece holding the capital keeps the parent's
/// classification and the other is captured. When neither piece holds it,
/// both are captured.
pub fn split(
    region: &Region,
    line: &GeoSegment,
    capital: GeoPoint,
    tol: Tolerance,
) -> Option<(Piece, Piece)> {
    let crossings = boundary_crossings(&region.vertices, line, tol);
    if crossings.len() != 2 {
        return None;
    }
    let (first, second) = (crossings[0], crossings[1]);
    if !chord_inside(&region.vertices, first, second, tol.merge) {
        return None;
    }
    let (a, b) = split_polygon(&region.vertices, first, second, tol.merge)?;

    let (class_a, class_b) = if point_in_polygon(capital, &a) {
        (region.classification, Classification::Captured)
    } else if point_in_polygon(capital, &b) {
        (Classification::Captured, region.classification)
    } else {
        (Classification::Captured, Classification::Captured)
    };

    Some((
        Piece {
            vertices: a,
            classification: class_a,
        },
        Piece {
            vertices: b,
            classification: class_b,
        },
    ))
}

/// The current set of regions covering the territory
#[derive(Debug, Clone)]
pub struct Partition {
    boundary: Vec<GeoPoint>,
    regions: Vec<Region>,
    next_id: u32,
}

impl Partition {
    /// Single regime-owned region covering `boundary`
    pub fn new(boundary: Vec<GeoPoint>) -> Self {
        let mut partition = Self {
            boundary,
            regions: Vec::new(),
            next_id: 1,
        };
        partition.reset();
        partition
    }

    /// Drop every cut and start again from the boundary
    pub fn reset(&mut self) {
        self.next_id = 1;
        let id = self.allocate_id();
        self.regions = vec![Region::new(
            id,
            self.boundary.clone(),
            Classification::RegimeOwned,
        )];
    }

    fn allocate_id(&mut self) -> RegionId {
        let id = RegionId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn total_area(&self) -> f64 {
        self.regions.iter().map(Region::area).sum()
    }

    /// Summed area of all regions with the given classification
    pub fn area_of(&self, classification: Classification) -> f64 {
        self.regions
            .iter()
            .filter(|r| r.classification == classification)
            .map(Region::area)
            .sum()
    }

    /// Boundary crossings of `line` for every region it touches
    pub fn crossings(&self, line: &GeoSegment, tol: Tolerance) -> Vec<(RegionId, Vec<Crossing>)> {
        self.regions
            .iter()
            .map(|r| (r.id, boundary_crossings(&r.vertices, line, tol)))
            .filter(|(_, c)| !c.is_empty())
            .collect()
    }

    /// Split every region that `line` crosses exactly twice
    ///
    /// Returns the ids of the created regions, two per split, in partition order.
    pub fn apply_cut(&mut self, line: &GeoSegment, capital: GeoPoint, tol: Tolerance) -> Vec<RegionId> {
        let previous = std::mem::take(&mut self.regions);
        let mut created = Vec::new();

        for region in previous {
            match split(&region, line, capital, tol) {
                Some((a, b)) => {
                    let id_a = self.allocate_id();
                    let id_b = self.allocate_id();
                    tracing::debug!(
                        "Split {} into {} ({:?}) and {} ({:?})",
                        region.id,
                        id_a,
                        a.classification,
                        id_b,
                        b.classification
                    );
                    self.regions
                        .push(Region::new(id_a, a.vertices, a.classification));
                    self.regions
                        .push(Region::new(id_b, b.vertices, b.classification));
                    created.push(id_a);
                    created.push(id_b);
                }
                None => self.regions.push(region),
            }
        }
        created
    }

    /// Number of regions whose interior holds `p`
    pub fn regions_containing(&self, p: GeoPoint) -> usize {
        self.regions.iter().filter(|r| r.contains(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> GeoPoint {
        GeoPoint::new(x, y)
    }

    fn square() -> Vec<GeoPoint> {
        vec![p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)]
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> GeoSegment {
        GeoSegment::new(p(x1, y1), p(x2, y2))
    }

    #[test]
    fn test_crossings_of_chord() {
        let c = boundary_crossings(&square(), &line(-1.0, 5.0, 11.0, 5.0), Tolerance::default());
        assert_eq!(c.len(), 2);
        assert_eq!(c[0].edge, 1);
        assert_eq!(c[1].edge, 3);
    }

    #[test]
    fn test_line_through_vertex_counts_once() {
        // Diagonal from outside corner to outside corner passes two vertices
        let c = boundary_crossings(&square(), &line(-1.0, -1.0, 11.0, 11.0), Tolerance::default());
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_split_square_in_half() {
        let region = Region::new(RegionId(1), square(), Classification::RegimeOwned);
        let (a, b) = split(
            &region,
            &line(-1.0, 5.0, 11.0, 5.0),
            p(5.0, 1.0),
            Tolerance::default(),
        )
        .expect("chord splits the square");

        assert!((polygon_area(&a.vertices) - 50.0).abs() < 1e-9);
        assert!((polygon_area(&b.vertices) - 50.0).abs() < 1e-9);
        // Piece A walks from the right edge over the top, so it is the upper half
        assert_eq!(a.classification, Classification::Captured);
        assert_eq!(b.classification, Classification::RegimeOwned);
    }

    #[test]
    fn test_split_needs_two_crossings() {
        let region = Region::new(RegionId(1), square(), Classification::RegimeOwned);
        let tol = Tolerance::default();
        // Ends inside the square: one crossing
        assert!(split(&region, &line(-1.0, 5.0, 5.0, 5.0), p(5.0, 1.0), tol).is_none());
        // Misses entirely
        assert!(split(&region, &line(-5.0, -5.0, -1.0, 20.0), p(5.0, 1.0), tol).is_none());
        // Fully inside
        assert!(split(&region, &line(2.0, 5.0, 8.0, 5.0), p(5.0, 1.0), tol).is_none());
    }

    #[test]
    fn test_split_concave_with_four_crossings_is_refused() {
        let u = vec![
            p(0.0, 0.0),
            p(6.0, 0.0),
            p(6.0, 6.0),
            p(4.0, 6.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 6.0),
            p(0.0, 6.0),
        ];
        let region = Region::new(RegionId(1), u, Classification::RegimeOwned);
        let cut = line(-1.0, 4.0, 7.0, 4.0);
        assert_eq!(boundary_crossings(&region.vertices, &cut, Tolerance::default()).len(), 4);
        assert!(split(&region, &cut, p(3.0, 1.0), Tolerance::default()).is_none());
    }

    fn u_shape() -> Vec<GeoPoint> {
        vec![
            p(0.0, 0.0),
            p(6.0, 0.0),
            p(6.0, 6.0),
            p(4.0, 6.0),
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 6.0),
            p(0.0, 6.0),
        ]
    }

    #[test]
    fn test_vertex_touch_counts_on_both_edges() {
        // Grazes the top of the left arm at (2, 6), then enters the right arm
        let cut = line(-1.0, 7.0, 5.0, 5.0);
        let crossings = boundary_crossings(&u_shape(), &cut, Tolerance::default());
        assert_eq!(crossings.len(), 3);
        // Edge order: the right arm's inner wall, then both edges at the touched vertex
        assert!(crossings[0].point.distance(&p(4.0, 16.0 / 3.0)) < 1e-9);
        assert_eq!((crossings[1].edge, crossings[2].edge), (5, 6));
        assert_eq!(crossings[1].point, p(2.0, 6.0));

        let region = Region::new(RegionId(1), u_shape(), Classification::RegimeOwned);
        assert!(split(&region, &cut, p(3.0, 1.0), Tolerance::default()).is_none());
    }

    #[test]
    fn test_touch_alone_does_not_split() {
        let region = Region::new(RegionId(1), square(), Classification::RegimeOwned);
        let cut = line(-1.0, 9.0, 1.0, 11.0);
        assert_eq!(boundary_crossings(&region.vertices, &cut, Tolerance::default()).len(), 2);
        assert!(split(&region, &cut, p(5.0, 5.0), Tolerance::default()).is_none());
    }

    #[test]
    fn test_chord_outside_region_does_not_split() {
        let region = Region::new(RegionId(1), u_shape(), Classification::RegimeOwned);
        let cut = line(1.0, 4.0, 5.0, 4.0);
        let crossings = boundary_crossings(&region.vertices, &cut, Tolerance::default());
        assert_eq!(crossings.len(), 2);
        assert!(!chord_inside(&region.vertices, crossings[0], crossings[1], 1e-9));
        assert!(split(&region, &cut, p(3.0, 1.0), Tolerance::default()).is_none());
    }

    #[test]
    fn test_line_along_edge_does_not_split() {
        let region = Region::new(RegionId(1), square(), Classification::RegimeOwned);
        assert!(split(
            &region,
            &line(-1.0, 0.0, 11.0, 0.0),
            p(5.0, 5.0),
            Tolerance::default()
        )
        .is_none());
    }

    #[test]
    fn test_split_without_capital_captures_both() {
        let region = Region::new(RegionId(4), square(), Classification::Captured);
        let (a, b) = split(
            &region,
            &line(5.0, -1.0, 5.0, 11.0),
            p(50.0, 50.0),
            Tolerance::default(),
        )
        .unwrap();
        assert_eq!(a.classification, Classification::Captured);
        assert_eq!(b.classification, Classification::Captured);
    }

    #[test]
    fn test_apply_cut_keeps_area_and_ids() {
        let mut partition = Partition::new(square());
        let tol = Tolerance::default();
        let capital = p(2.0, 2.0);

        let created = partition.apply_cut(&line(-1.0, 5.0, 11.0, 5.0), capital, tol);
        assert_eq!(created, vec![RegionId(2), RegionId(3)]);
        assert_eq!(partition.len(), 2);

        let created = partition.apply_cut(&line(7.0, 4.0, 7.0, 11.0), capital, tol);
        assert_eq!(created.len(), 2);
        assert_eq!(partition.len(), 3);

        assert!((partition.total_area() - 100.0).abs() < 1e-9);
        assert!((partition.area_of(Classification::RegimeOwned) - 50.0).abs() < 1e-9);
        assert_eq!(partition.regions_containing(capital), 1);
    }

    #[test]
    fn test_reset_restores_single_region() {
        let mut partition = Partition::new(square());
        partition.apply_cut(&line(-1.0, 5.0, 11.0, 5.0), p(2.0, 2.0), Tolerance::default());
        partition.reset();
        assert_eq!(partition.len(), 1);
        assert_eq!(partition.regions()[0].id, RegionId(1));
        assert_eq!(partition.regions()[0].classification, Classification::RegimeOwned);
    }
}
