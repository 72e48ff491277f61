// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Support post estimation for the repeating triangular module pattern
//!
//! One module spans one grid cell width. Along a row, low posts stand at the
//! module base endpoints and tall posts at the apex of every full module
//! (plus one more when at least half a module remains). The same row pattern
//! repeats at every grid-height step through the depth.

use crate::facade::{classify_facades, FacadeGroups};
use crate::polygon::Polygon;
use greenhouse_model::{FacadeDirection, GridSpec};
use serde::{Deserialize, Serialize};

/// Post counts with the measurements they were derived from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PostEstimate {
    /// Grid cell width used, meters
    pub grid_w_m: f64,
    /// Grid cell height used, meters
    pub grid_h_m: f64,
    /// Pixels per meter used
    pub scale_px_per_m: f64,
    /// Number of depth rows (grid lines through the depth)
    pub rows: u32,
    /// Full modules per row (rectangular fast path only)
    pub full_modules_per_row: Option<u32>,
    /// Whether a half module remains per row (rectangular fast path only)
    pub has_half_module_per_row: Option<bool>,
    /// Low posts per row (rectangular fast path only)
    pub low_posts_per_row: Option<u32>,
    /// Tall posts per row (rectangular fast path only)
    pub tall_posts_per_row: Option<u32>,
    /// Total low posts across all rows
    pub total_low_posts: u32,
    /// Total tall posts across all rows
    pub total_tall_posts: u32,
    /// North facade width, meters
    pub north_width_m: f64,
    /// North-to-south depth, meters
    pub depth_m: f64,
    /// Human-readable derivation note
    pub notes: String,
}

/// Module arithmetic for one horizontal span: (full modules, has half)
fn span_modules(span_px: f64, module_px: f64, grid_w_px: f64) -> (u32, bool) {
    if span_px <= 0.0 {
        return (0, false);
    }
    let n_full = (span_px / module_px).floor() as u32;
    let rem = span_px - n_full as f64 * module_px;
    let has_half = rem >= 0.5 * grid_w_px - 1e-6;
    (n_full, has_half)
}

/// North/south reference measurements shared by both variants
struct NorthSouthFrame {
    width_px: f64,
    north_y: f64,
    depth_px: f64,
}

fn north_south_frame(groups: &FacadeGroups) -> Option<NorthSouthFrame> {
    let (nx1, nx2) = groups.x_extent(FacadeDirection::North)?;
    let north_y = groups.average_y(FacadeDirection::North)?;
    let south_y = groups.average_y(FacadeDirection::South)?;
    Some(NorthSouthFrame {
        width_px: (nx2 - nx1).max(0.0),
        north_y,
        depth_px: (south_y - north_y).max(0.0),
    })
}

/// Estimate posts via the rectangular fast path
///
/// Measures the north facade extent and the north-to-south depth, applies
/// the module arithmetic once per row and multiplies by the row count.
/// Returns `None` when the north or south facade group is empty or the grid
/// spec is not positive.
pub fn estimate_posts(polygon: &Polygon, grid: &GridSpec) -> Option<PostEstimate> {
    if !polygon.has_area_support() {
        return None;
    }
    let groups = classify_facades(polygon);
    if groups.north.is_empty() || groups.south.is_empty() {
        return None;
    }
    let grid_w_px = grid.cell_w_px();
    let grid_h_px = grid.cell_h_px();
    if grid_w_px <= 0.0 || grid_h_px <= 0.0 {
        return None;
    }

    let frame = north_south_frame(&groups)?;
    let module_px = grid_w_px;
    let (n_full, has_half) = span_modules(frame.width_px, module_px, grid_w_px);

    // Tall posts sit at module apexes, low posts at base endpoints
    let tall_per_row = n_full + u32::from(has_half);
    let low_per_row = n_full + 1;

    let rows = (frame.depth_px / grid_h_px).floor().max(0.0) as u32 + 1;

    log::debug!(
        "post estimate: {} modules/row (half: {}), {} rows",
        n_full,
        has_half,
        rows
    );

    Some(PostEstimate {
        grid_w_m: grid.cell_w_m,
        grid_h_m: grid.cell_h_m,
        scale_px_per_m: grid.scale_px_per_m,
        rows,
        full_modules_per_row: Some(n_full),
        has_half_module_per_row: Some(has_half),
        low_posts_per_row: Some(low_per_row),
        tall_posts_per_row: Some(tall_per_row),
        total_low_posts: low_per_row * rows,
        total_tall_posts: tall_per_row * rows,
        north_width_m: grid.px_to_m(frame.width_px),
        depth_m: grid.px_to_m(frame.depth_px),
        notes: "Counts assume a grid-aligned perimeter and a repeating module pattern across rows."
            .to_string(),
    })
}

/// Estimate posts by scanning every depth row (general polygons)
///
/// For each grid row the polygon is cut with a horizontal line; every
/// resulting span gets the module arithmetic independently and contributions
/// are summed across spans and rows. Non-convex perimeters may produce
/// several spans per row; rows or spans of non-positive length contribute
/// nothing.
pub fn estimate_posts_per_row(polygon: &Polygon, grid: &GridSpec) -> Option<PostEstimate> {
    if !polygon.has_area_support() {
        return None;
    }
    let groups = classify_facades(polygon);
    if groups.north.is_empty() || groups.south.is_empty() {
        return None;
    }
    let grid_w_px = grid.cell_w_px();
    let grid_h_px = grid.cell_h_px();
    if grid_w_px <= 0.0 || grid_h_px <= 0.0 {
        return None;
    }

    let frame = north_south_frame(&groups)?;
    let module_px = grid_w_px;
    let rows = (frame.depth_px / grid_h_px).floor().max(0.0) as u32 + 1;

    // Scan lines are nudged off the exact row y so lines through the north
    // or south boundary still see the interior span
    let nudge = grid_h_px * 1e-9;

    let mut total_low = 0u32;
    let mut total_tall = 0u32;
    for k in 0..rows {
        let y = frame.north_y + k as f64 * grid_h_px;
        let y_scan = if k + 1 == rows && rows > 1 {
            y - nudge
        } else {
            y + nudge
        };
        for (x0, x1) in polygon.horizontal_spans(y_scan) {
            let (n_full, has_half) = span_modules(x1 - x0, module_px, grid_w_px);
            if x1 - x0 > 0.0 {
                total_tall += n_full + u32::from(has_half);
                total_low += n_full + 1;
            }
        }
    }

    Some(PostEstimate {
        grid_w_m: grid.cell_w_m,
        grid_h_m: grid.cell_h_m,
        scale_px_per_m: grid.scale_px_per_m,
        rows,
        full_modules_per_row: None,
        has_half_module_per_row: None,
        low_posts_per_row: None,
        tall_posts_per_row: None,
        total_low_posts: total_low,
        total_tall_posts: total_tall,
        north_width_m: grid.px_to_m(frame.width_px),
        depth_m: grid.px_to_m(frame.depth_px),
        notes: "Per-row scan across grid lines; posts summed over all horizontal spans.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid() -> GridSpec {
        GridSpec::new(5.0, 3.0, 5.0)
    }

    fn rectangle() -> Polygon {
        // 100 m x 60 m at 5 px/m
        Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 300.0), (0.0, 300.0)])
    }

    #[test]
    fn test_reference_rectangle_counts() {
        // 20 modules across, 21 rows through the depth
        let est = estimate_posts(&rectangle(), &grid()).unwrap();
        assert_eq!(est.rows, 21);
        assert_eq!(est.full_modules_per_row, Some(20));
        assert_eq!(est.has_half_module_per_row, Some(false));
        assert_eq!(est.low_posts_per_row, Some(21));
        assert_eq!(est.tall_posts_per_row, Some(20));
        assert_eq!(est.total_low_posts, 441);
        assert_eq!(est.total_tall_posts, 420);
        assert_relative_eq!(est.north_width_m, 100.0);
        assert_relative_eq!(est.depth_m, 60.0);
    }

    #[test]
    fn test_half_module_adds_one_tall_post() {
        // 52.5 m wide: 10 full modules plus exactly half a module
        let poly = Polygon::from_xy(&[(0.0, 0.0), (262.5, 0.0), (262.5, 300.0), (0.0, 300.0)]);
        let est = estimate_posts(&poly, &grid()).unwrap();
        assert_eq!(est.full_modules_per_row, Some(10));
        assert_eq!(est.has_half_module_per_row, Some(true));
        assert_eq!(est.tall_posts_per_row, Some(11));
        assert_eq!(est.low_posts_per_row, Some(11));
    }

    #[test]
    fn test_remainder_below_half_module_ignored() {
        // 52 m wide: remainder of 2 m stays below the 2.5 m half module
        let poly = Polygon::from_xy(&[(0.0, 0.0), (260.0, 0.0), (260.0, 300.0), (0.0, 300.0)]);
        let est = estimate_posts(&poly, &grid()).unwrap();
        assert_eq!(est.has_half_module_per_row, Some(false));
        assert_eq!(est.tall_posts_per_row, Some(10));
    }

    #[test]
    fn test_per_row_scan_matches_fast_path_on_rectangle() {
        let fast = estimate_posts(&rectangle(), &grid()).unwrap();
        let scanned = estimate_posts_per_row(&rectangle(), &grid()).unwrap();
        assert_eq!(scanned.rows, fast.rows);
        assert_eq!(scanned.total_low_posts, fast.total_low_posts);
        assert_eq!(scanned.total_tall_posts, fast.total_tall_posts);
    }

    #[test]
    fn test_per_row_scan_sees_disjoint_spans() {
        // U shape: 100 m wide, 60 m deep, with a 50 m wide notch down to
        // 30 m depth in the middle
        let poly = Polygon::from_xy(&[
            (0.0, 0.0),
            (125.0, 0.0),
            (125.0, 150.0),
            (375.0, 150.0),
            (375.0, 0.0),
            (500.0, 0.0),
            (500.0, 300.0),
            (0.0, 300.0),
        ]);
        let est = estimate_posts_per_row(&poly, &grid()).unwrap();
        // The notch floor edge sits on the box-center line and joins the
        // north group, pulling the averaged north reference down to y=50:
        // depth 250 px => 17 rows starting at y=50
        assert_eq!(est.rows, 17);
        // Rows at y=50..140 (7 rows): two 25 m legs => 2 * (5 + 1) = 12
        // low, 2 * 5 = 10 tall. Rows at y=155..290 (10 rows): one 100 m
        // span => 21 low, 20 tall.
        assert_eq!(est.total_low_posts, 7 * 12 + 10 * 21);
        assert_eq!(est.total_tall_posts, 7 * 10 + 10 * 20);
    }

    #[test]
    fn test_absent_without_facades_or_grid() {
        assert!(estimate_posts(&Polygon::from_xy(&[]), &grid()).is_none());
        let bad_grid = GridSpec::new(5.0, 3.0, 0.0);
        assert!(estimate_posts(&rectangle(), &bad_grid).is_none());
        assert!(estimate_posts_per_row(&rectangle(), &bad_grid).is_none());
    }

    #[test]
    fn test_shallow_polygon_still_has_one_row() {
        // Depth below one grid cell: a single row of posts remains
        let poly = Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 10.0), (0.0, 10.0)]);
        let est = estimate_posts(&poly, &grid()).unwrap();
        assert_eq!(est.rows, 1);
        assert_eq!(est.total_low_posts, 21);
    }
}
