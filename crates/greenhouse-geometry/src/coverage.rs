// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon / grid coverage analysis
//!
//! Intersects the perimeter with the regular drawing grid and reports full
//! cells (entirely inside) and partial cells (boundary cells) with their
//! intersection areas and boundary-length measures. The scan range is the
//! polygon bounding box expanded by one cell on each side; rows are scanned
//! in parallel.

use crate::polygon::{
    clip_segment_to_rect, rect_contour, shapes_area, Polygon, Shapes,
};
use greenhouse_model::GridSpec;
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use nalgebra::Point2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One boundary cell of the coverage scan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartialCell {
    /// Grid cell indices (column, row)
    pub grid: (i64, i64),
    /// Intersection area in squared pixels
    pub area_px2: f64,
    /// Intersection area in square meters
    pub area_m2: f64,
    /// Total polygon boundary length inside the cell, meters
    pub boundary_length_m: f64,
    /// Boundary length inside the epsilon-shrunk cell, meters
    ///
    /// Approximates the length actually crossing the cell interior by
    /// excluding pieces that run exactly along a cell edge.
    pub boundary_crossing_length_m: f64,
    /// Per-piece boundary lengths inside the cell, meters
    pub boundary_segments_m: Vec<f64>,
    /// Per-piece boundary lengths inside the shrunk cell, meters
    pub boundary_crossing_segments_m: Vec<f64>,
    /// Intersection outline (shapes of contours)
    pub outline: Shapes,
}

/// Full coverage report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridCoverage {
    /// Polygon area in squared pixels (after even-odd repair)
    pub polygon_area_px2: f64,
    /// Polygon area in square meters
    pub polygon_area_m2: f64,
    /// Pixels per meter used for the conversion
    pub scale_px_per_m: f64,
    /// Number of cells entirely inside the polygon
    pub full_count: u32,
    /// Combined area of the full cells, square meters
    pub full_area_m2: f64,
    /// Boundary cells with their measures, in row-major scan order
    pub partial_cells: Vec<PartialCell>,
}

/// Lightweight partial-cell record for UI overlays
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PartialBox {
    /// Grid cell indices (column, row)
    pub grid: (i64, i64),
    /// Intersection area in squared pixels
    pub area_px2: f64,
    /// Intersection outline (shapes of contours)
    pub outline: Shapes,
}

/// Negligible-area threshold for a cell of the given area
fn negligible_area(cell_area: f64) -> f64 {
    (1e-6 * cell_area).max(1e-6)
}

/// Intersection of the perimeter with one cell rectangle
///
/// Even-odd filling repairs self-intersecting input on the fly. Returns the
/// intersection shapes and their area; an empty intersection yields empty
/// shapes with zero area.
fn cell_intersection(contour: &[[f64; 2]], x0: f64, y0: f64, x1: f64, y1: f64) -> (Shapes, f64) {
    let subject = vec![contour.to_vec()];
    let clip = vec![rect_contour(x0, y0, x1, y1)];
    let shapes = subject.overlay(&clip, OverlayRule::Intersect, FillRule::EvenOdd);
    let area = shapes_area(&shapes);
    (shapes, area)
}

/// Classification outcome for a single scanned cell
enum CellKind {
    Outside,
    Full(f64),
    Partial(PartialCell),
}

fn scan_cell(
    contour: &[[f64; 2]],
    edges: &[(Point2<f64>, Point2<f64>, usize)],
    grid: &GridSpec,
    gx: i64,
    gy: i64,
) -> CellKind {
    let cell_w = grid.cell_w_px();
    let cell_h = grid.cell_h_px();
    let x0 = gx as f64 * cell_w;
    let y0 = gy as f64 * cell_h;
    let x1 = x0 + cell_w;
    let y1 = y0 + cell_h;
    let cell_area = cell_w * cell_h;

    let (shapes, area_px2) = cell_intersection(contour, x0, y0, x1, y1);
    if area_px2 <= 0.0 {
        return CellKind::Outside;
    }
    let threshold = negligible_area(cell_area);
    if cell_area - area_px2 <= threshold {
        return CellKind::Full(cell_area);
    }
    if area_px2 <= threshold {
        // Sliver intersection, treated as noise
        return CellKind::Outside;
    }

    let scale = grid.scale_px_per_m;
    let mut boundary_segments_m = Vec::new();
    for (p1, p2, _) in edges {
        if let Some((a, b)) = clip_segment_to_rect(*p1, *p2, x0, y0, x1, y1) {
            let len_px = (b - a).norm();
            if len_px > 0.0 {
                boundary_segments_m.push(len_px / scale);
            }
        }
    }

    // Shrink the cell by a tiny epsilon to drop boundary pieces that run
    // exactly along a cell edge
    let inner_eps = (cell_w.min(cell_h) * 1e-6).max(1e-6);
    let mut boundary_crossing_segments_m = Vec::new();
    for (p1, p2, _) in edges {
        if let Some((a, b)) = clip_segment_to_rect(
            *p1,
            *p2,
            x0 + inner_eps,
            y0 + inner_eps,
            x1 - inner_eps,
            y1 - inner_eps,
        ) {
            let len_px = (b - a).norm();
            if len_px > 0.0 {
                boundary_crossing_segments_m.push(len_px / scale);
            }
        }
    }

    CellKind::Partial(PartialCell {
        grid: (gx, gy),
        area_px2,
        area_m2: area_px2 / (scale * scale),
        boundary_length_m: boundary_segments_m.iter().sum(),
        boundary_crossing_length_m: boundary_crossing_segments_m.iter().sum(),
        boundary_segments_m,
        boundary_crossing_segments_m,
        outline: shapes,
    })
}

/// Grid index scan range: bounding box expanded one cell on each side
fn scan_range(polygon: &Polygon, grid: &GridSpec) -> Option<(i64, i64, i64, i64)> {
    let (min, max) = polygon.bounding_box()?;
    let cell_w = grid.cell_w_px();
    let cell_h = grid.cell_h_px();
    let gx0 = (min.x / cell_w).floor() as i64 - 1;
    let gy0 = (min.y / cell_h).floor() as i64 - 1;
    let gx1 = (max.x / cell_w).floor() as i64 + 2;
    let gy1 = (max.y / cell_h).floor() as i64 + 2;
    Some((gx0, gy0, gx1, gy1))
}

/// Compute polygon coverage against the drawing grid
///
/// Returns `None` (not computable) for fewer than 3 vertices or a
/// non-positive grid spec.
pub fn compute_grid_coverage(polygon: &Polygon, grid: &GridSpec) -> Option<GridCoverage> {
    if !polygon.has_area_support() || !grid.is_valid() {
        return None;
    }
    let (gx0, gy0, gx1, gy1) = scan_range(polygon, grid)?;
    let contour = polygon.contour();
    let edges = polygon.edges();
    let scale = grid.scale_px_per_m;

    let polygon_area_px2 = polygon.area_px2();
    let polygon_area_m2 = polygon_area_px2 / (scale * scale);

    // Row-parallel scan; cells within a row stay in column order, rows are
    // collected in order, so the output matches a sequential scan
    let rows: Vec<(u32, f64, Vec<PartialCell>)> = (gy0..gy1)
        .into_par_iter()
        .map(|gy| {
            let mut full_count = 0u32;
            let mut full_area_px2 = 0.0;
            let mut partials = Vec::new();
            for gx in gx0..gx1 {
                match scan_cell(&contour, &edges, grid, gx, gy) {
                    CellKind::Outside => {}
                    CellKind::Full(area) => {
                        full_count += 1;
                        full_area_px2 += area;
                    }
                    CellKind::Partial(cell) => partials.push(cell),
                }
            }
            (full_count, full_area_px2, partials)
        })
        .collect();

    let mut full_count = 0u32;
    let mut full_area_px2 = 0.0;
    let mut partial_cells = Vec::new();
    for (count, area, partials) in rows {
        full_count += count;
        full_area_px2 += area;
        partial_cells.extend(partials);
    }

    log::debug!(
        "grid coverage: {} full cells, {} partial cells, polygon {:.2} m2",
        full_count,
        partial_cells.len(),
        polygon_area_m2
    );

    Some(GridCoverage {
        polygon_area_px2,
        polygon_area_m2,
        scale_px_per_m: scale,
        full_count,
        full_area_m2: full_area_px2 / (scale * scale),
        partial_cells,
    })
}

/// Partial cells only, for lightweight UI overlays
///
/// Returns an empty list (rather than `None`) on insufficient input, so the
/// overlay can always iterate.
pub fn compute_grid_box_counts(polygon: &Polygon, grid: &GridSpec) -> Vec<PartialBox> {
    if !polygon.has_area_support() || !grid.is_valid() {
        return Vec::new();
    }
    let range = match scan_range(polygon, grid) {
        Some(r) => r,
        None => return Vec::new(),
    };
    let (gx0, gy0, gx1, gy1) = range;
    let contour = polygon.contour();
    let edges = polygon.edges();

    let mut boxes = Vec::new();
    for gy in gy0..gy1 {
        for gx in gx0..gx1 {
            if let CellKind::Partial(cell) = scan_cell(&contour, &edges, grid, gx, gy) {
                boxes.push(PartialBox {
                    grid: cell.grid,
                    area_px2: cell.area_px2,
                    outline: cell.outline,
                });
            }
        }
    }
    boxes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> GridSpec {
        GridSpec::new(5.0, 3.0, 5.0)
    }

    fn aligned_rectangle() -> Polygon {
        // 500 x 300 px at 5 px/m: exactly 20 x 20 grid cells of 25 x 15 px
        Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 300.0), (0.0, 300.0)])
    }

    #[test]
    fn test_aligned_rectangle_is_all_full_cells() {
        let coverage = compute_grid_coverage(&aligned_rectangle(), &grid()).unwrap();
        assert_eq!(coverage.full_count, 400);
        assert!(coverage.partial_cells.is_empty());
        assert_relative_eq!(coverage.polygon_area_m2, 6000.0, max_relative = 1e-6);
        assert_relative_eq!(coverage.full_area_m2, 6000.0, max_relative = 1e-6);
    }

    #[test]
    fn test_offset_rectangle_has_partials_and_conserves_area() {
        // Shifted off the grid lines: a ring of partial cells appears
        let poly = Polygon::from_xy(&[(7.0, 4.0), (507.0, 4.0), (507.0, 304.0), (7.0, 304.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        assert!(!coverage.partial_cells.is_empty());
        let partial_sum: f64 = coverage.partial_cells.iter().map(|c| c.area_m2).sum();
        assert_relative_eq!(
            coverage.full_area_m2 + partial_sum,
            coverage.polygon_area_m2,
            max_relative = 1e-6
        );
    }

    #[test]
    fn test_partial_boundary_lengths() {
        // A 25 x 15 px square straddling four cells from (5, 5)
        let poly = Polygon::from_xy(&[(5.0, 5.0), (30.0, 5.0), (30.0, 20.0), (5.0, 20.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        assert_eq!(coverage.full_count, 0);
        assert_eq!(coverage.partial_cells.len(), 4);

        // Cell (0, 0): top edge spans x 5..25 (20 px), left edge y 5..15
        // (10 px) => 30 px = 6 m of boundary
        let cell = coverage
            .partial_cells
            .iter()
            .find(|c| c.grid == (0, 0))
            .unwrap();
        assert_relative_eq!(cell.boundary_length_m, 6.0, max_relative = 1e-6);
        // Nothing runs along a cell edge here, so the crossing measure
        // matches
        assert_relative_eq!(
            cell.boundary_crossing_length_m,
            cell.boundary_length_m,
            max_relative = 1e-3
        );
    }

    #[test]
    fn test_boundary_on_cell_edge_excluded_from_crossing() {
        // Rectangle whose top edge lies exactly on the y=15 grid line; in
        // the cells below, that piece counts for the boundary measure but
        // not the crossing measure
        let poly = Polygon::from_xy(&[(5.0, 15.0), (30.0, 15.0), (30.0, 25.0), (5.0, 25.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        let cell = coverage
            .partial_cells
            .iter()
            .find(|c| c.grid == (0, 1))
            .unwrap();
        assert!(cell.boundary_length_m > cell.boundary_crossing_length_m + 1.0);
    }

    #[test]
    fn test_triangle_coverage_conserves_area() {
        let poly = Polygon::from_xy(&[(0.0, 0.0), (200.0, 0.0), (0.0, 150.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        let partial_sum: f64 = coverage.partial_cells.iter().map(|c| c.area_m2).sum();
        let covered = coverage.full_area_m2 + partial_sum;
        assert_relative_eq!(covered, coverage.polygon_area_m2, max_relative = 1e-4);
    }

    #[test]
    fn test_absent_on_insufficient_input() {
        assert!(compute_grid_coverage(&Polygon::from_xy(&[]), &grid()).is_none());
        assert!(compute_grid_coverage(
            &Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0)]),
            &grid()
        )
        .is_none());
        let bad_grid = GridSpec::new(5.0, 3.0, 0.0);
        assert!(compute_grid_coverage(&aligned_rectangle(), &bad_grid).is_none());
    }

    #[test]
    fn test_box_counts_returns_partials_only() {
        let poly = Polygon::from_xy(&[(7.0, 4.0), (507.0, 4.0), (507.0, 304.0), (7.0, 304.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        let boxes = compute_grid_box_counts(&poly, &grid());
        assert_eq!(boxes.len(), coverage.partial_cells.len());
        for (b, c) in boxes.iter().zip(&coverage.partial_cells) {
            assert_eq!(b.grid, c.grid);
            assert_relative_eq!(b.area_px2, c.area_px2, max_relative = 1e-9);
        }
        assert!(compute_grid_box_counts(&Polygon::from_xy(&[]), &grid()).is_empty());
    }

    #[test]
    fn test_self_intersecting_polygon_is_repaired() {
        // Bowtie: even-odd filling yields two triangles; the scan must not
        // panic and must cover a positive area
        let poly = Polygon::from_xy(&[(0.0, 0.0), (100.0, 100.0), (100.0, 0.0), (0.0, 100.0)]);
        let coverage = compute_grid_coverage(&poly, &grid()).unwrap();
        assert!(coverage.polygon_area_px2 > 0.0);
        let partial_sum: f64 = coverage.partial_cells.iter().map(|c| c.area_m2).sum();
        assert_relative_eq!(
            coverage.full_area_m2 + partial_sum,
            coverage.polygon_area_m2,
            max_relative = 1e-3
        );
    }
}
