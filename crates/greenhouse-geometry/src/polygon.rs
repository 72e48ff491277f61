// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon primitive for perimeter analysis
//!
//! A perimeter drawn on the canvas arrives as an ordered vertex list in
//! scaled pixel units. It may be open (implicitly closed) or explicitly
//! closed (first == last). Self-intersecting input is tolerated: boolean
//! operations run with even-odd filling, which doubles as repair.

use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;

/// Grouped boolean-op output: shapes, each an outer contour plus holes
pub type Shapes = Vec<Vec<Vec<[f64; 2]>>>;

/// Ordered polygon vertex list in scaled pixel units (y-down)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Point2<f64>>,
}

impl Polygon {
    /// Create a polygon from vertices
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    /// Create a polygon from raw (x, y) pairs as produced by the canvas
    pub fn from_xy(xy: &[(f64, f64)]) -> Self {
        Self {
            points: xy.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    /// Vertex list as given
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Number of vertices as given
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether enough vertices exist for area/coverage computations
    pub fn has_area_support(&self) -> bool {
        self.len() >= 3
    }

    /// Vertices with the closing vertex appended when the input is open
    pub fn closed_points(&self) -> Vec<Point2<f64>> {
        let mut pts = self.points.clone();
        if pts.len() >= 2 && pts.first() != pts.last() {
            pts.push(pts[0]);
        }
        pts
    }

    /// Vertices with a duplicated closing vertex removed
    pub fn open_points(&self) -> &[Point2<f64>] {
        if self.points.len() >= 2 && self.points.first() == self.points.last() {
            &self.points[..self.points.len() - 1]
        } else {
            &self.points
        }
    }

    /// Edges as (start, end, start-vertex index), wrapping last-to-first
    ///
    /// Zero-length edges are skipped rather than reported.
    pub fn edges(&self) -> Vec<(Point2<f64>, Point2<f64>, usize)> {
        let pts = self.open_points();
        let n = pts.len();
        if n < 2 {
            return Vec::new();
        }
        let mut edges = Vec::with_capacity(n);
        for i in 0..n {
            let p1 = pts[i];
            let p2 = pts[(i + 1) % n];
            if p1 == p2 {
                continue;
            }
            edges.push((p1, p2, i));
        }
        edges
    }

    /// Axis-aligned bounding box as (min, max), None when empty
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = self.points.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Center of the bounding box (not the centroid)
    pub fn bounding_box_center(&self) -> Option<Point2<f64>> {
        let (min, max) = self.bounding_box()?;
        Some(Point2::new(
            (min.x + max.x) * 0.5,
            (min.y + max.y) * 0.5,
        ))
    }

    /// Outer contour in the boolean-op point format
    pub fn contour(&self) -> Vec<[f64; 2]> {
        self.open_points().iter().map(|p| [p.x, p.y]).collect()
    }

    /// Even-odd repaired shapes of this polygon
    ///
    /// Intersecting with the expanded bounding box normalizes
    /// self-intersecting input the same way a zero-width buffer would.
    pub fn repaired_shapes(&self) -> Shapes {
        if !self.has_area_support() {
            return Vec::new();
        }
        let (min, max) = match self.bounding_box() {
            Some(bb) => bb,
            None => return Vec::new(),
        };
        let margin = ((max.x - min.x) + (max.y - min.y)).max(1.0);
        let clip = vec![rect_contour(
            min.x - margin,
            min.y - margin,
            max.x + margin,
            max.y + margin,
        )];
        let subject = vec![self.contour()];
        subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd)
    }

    /// Polygon area in squared pixel units (even-odd, repair applied)
    pub fn area_px2(&self) -> f64 {
        shapes_area(&self.repaired_shapes())
    }

    /// Horizontal spans of the polygon interior at the given y
    ///
    /// Even-odd crossing scan; a non-convex perimeter may produce several
    /// disjoint (x_start, x_end) spans. Callers scanning along grid rows
    /// should nudge y off exact vertex rows.
    pub fn horizontal_spans(&self, y: f64) -> Vec<(f64, f64)> {
        let mut xs: Vec<f64> = Vec::new();
        for (p1, p2, _) in self.edges() {
            if (p1.y <= y) != (p2.y <= y) {
                let t = (y - p1.y) / (p2.y - p1.y);
                xs.push(p1.x + t * (p2.x - p1.x));
            }
        }
        xs.sort_by(f64::total_cmp);
        xs.chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .filter(|(x0, x1)| x1 > x0)
            .collect()
    }
}

/// Rectangle contour in the boolean-op point format
pub fn rect_contour(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<[f64; 2]> {
    vec![[x0, y0], [x1, y0], [x1, y1], [x0, y1]]
}

/// Signed shoelace area of a contour
pub fn signed_area(contour: &[[f64; 2]]) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let [x1, y1] = contour[i];
        let [x2, y2] = contour[(i + 1) % n];
        sum += x1 * y2 - x2 * y1;
    }
    sum * 0.5
}

/// Total area of boolean-op shapes
///
/// Within one shape the hole contours carry opposite winding, so the signed
/// sum already subtracts them from the outer contour.
pub fn shapes_area(shapes: &Shapes) -> f64 {
    shapes
        .iter()
        .map(|shape| {
            shape
                .iter()
                .map(|contour| signed_area(contour))
                .sum::<f64>()
                .abs()
        })
        .sum()
}

/// Clip a segment to an axis-aligned rectangle (Liang-Barsky)
///
/// Returns the clipped endpoints, or None when the segment misses the
/// rectangle. Segments running exactly along a rectangle edge are kept.
pub fn clip_segment_to_rect(
    p1: Point2<f64>,
    p2: Point2<f64>,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, p1.x - x0),
        (dx, x1 - p1.x),
        (-dy, p1.y - y0),
        (dy, y1 - p1.y),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    let a = Point2::new(p1.x + t0 * dx, p1.y + t0 * dy);
    let b = Point2::new(p1.x + t1 * dx, p1.y + t1 * dy);
    Some((a, b))
}
