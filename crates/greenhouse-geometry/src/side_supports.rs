// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Side support (plevra) estimation
//!
//! Plevra are individual brace pieces placed inside each pyramid along the
//! depth axis: the first one at a fixed offset from the facade pair, then
//! one every spacing interval. Same pyramid count as the facade pairs,
//! derived independently from the north extent.

use crate::facade::classify_facades;
use crate::polygon::Polygon;
use greenhouse_model::{FacadeDirection, GridSpec};
use serde::{Deserialize, Serialize};

/// Side support counts with the measurements they were derived from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideSupportEstimate {
    /// Total plevra pieces across all pyramids
    pub total_plevra: u32,
    /// Pyramids across the width
    pub num_pyramids: u32,
    /// Plevra per pyramid along the depth
    pub plevra_per_pyramid: u32,
    /// Piece length, meters (same as the facade pair length)
    pub pipe_length_m: f64,
    /// Greenhouse width, meters
    pub width_m: f64,
    /// Greenhouse depth, meters
    pub depth_m: f64,
    /// Depth available for plevra after both end offsets, meters
    pub usable_depth_m: f64,
    /// Offset from the facade pair to the first plevra, meters
    pub first_offset_m: f64,
    /// Spacing between consecutive plevra, meters
    pub spacing_m: f64,
    /// Human-readable derivation note
    pub notes: String,
}

/// Estimate plevra pieces for all pyramids
///
/// Returns `None` when the north or south facade group is empty, the grid
/// spec is not positive, or the spacing is not positive. Zero pyramids and
/// insufficient depth are reportable zero-results, not absences.
pub fn estimate_side_supports(
    polygon: &Polygon,
    grid: &GridSpec,
    pipe_length_m: f64,
    first_offset_m: f64,
    spacing_m: f64,
) -> Option<SideSupportEstimate> {
    if !polygon.has_area_support() {
        return None;
    }
    let groups = classify_facades(polygon);
    if groups.north.is_empty() || groups.south.is_empty() {
        return None;
    }
    if grid.scale_px_per_m <= 0.0 || spacing_m <= 0.0 {
        return None;
    }

    let (nx1, nx2) = groups.x_extent(FacadeDirection::North)?;
    let north_y = groups.average_y(FacadeDirection::North)?;
    let south_y = groups.average_y(FacadeDirection::South)?;
    let width_px = nx2 - nx1;
    let depth_px = (south_y - north_y).abs();

    let width_m = grid.px_to_m(width_px);
    let depth_m = grid.px_to_m(depth_px);

    let grid_w_px = grid.cell_w_px();
    if grid_w_px <= 0.0 {
        return None;
    }
    let num_pyramids = (width_px / grid_w_px).round() as u32;

    if num_pyramids == 0 {
        return Some(SideSupportEstimate {
            total_plevra: 0,
            num_pyramids: 0,
            plevra_per_pyramid: 0,
            pipe_length_m,
            width_m,
            depth_m,
            usable_depth_m: 0.0,
            first_offset_m,
            spacing_m,
            notes: "No pyramids found.".to_string(),
        });
    }

    // Leave the first offset free at both facades
    let usable_depth_m = depth_m - 2.0 * first_offset_m;
    if usable_depth_m <= 0.0 {
        return Some(SideSupportEstimate {
            total_plevra: 0,
            num_pyramids,
            plevra_per_pyramid: 0,
            pipe_length_m,
            width_m,
            depth_m,
            usable_depth_m,
            first_offset_m,
            spacing_m,
            notes: "Pyramid depth too short for plevra placement.".to_string(),
        });
    }

    // One piece at the offset, then one per spacing interval
    let plevra_per_pyramid = (usable_depth_m / spacing_m).floor() as u32 + 1;
    let total_plevra = num_pyramids * plevra_per_pyramid;

    Some(SideSupportEstimate {
        total_plevra,
        num_pyramids,
        plevra_per_pyramid,
        pipe_length_m,
        width_m,
        depth_m,
        usable_depth_m,
        first_offset_m,
        spacing_m,
        notes: format!(
            "Total: {} plevra = {} pyramids x {} plevra/pyramid. Each {}m long.",
            total_plevra, num_pyramids, plevra_per_pyramid, pipe_length_m
        ),
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
        Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 300.0), (0.0, 300.0)])
    }

    #[test]
    fn test_reference_rectangle_supports() {
        // 20 pyramids; usable depth 59 m => floor(59/1)+1 = 60 per pyramid
        let est = estimate_side_supports(&rectangle(), &grid(), 2.54, 0.5, 1.0).unwrap();
        assert_eq!(est.num_pyramids, 20);
        assert_relative_eq!(est.usable_depth_m, 59.0);
        assert_eq!(est.plevra_per_pyramid, 60);
        assert_eq!(est.total_plevra, 1200);
    }

    #[test]
    fn test_pyramid_count_matches_facade_pairs() {
        // Both estimators must agree on the pyramid count for identical
        // input
        let pairs = crate::facade_pairs::estimate_facade_pairs(&rectangle(), &grid(), 2.54)
            .unwrap();
        let supports = estimate_side_supports(&rectangle(), &grid(), 2.54, 0.5, 1.0).unwrap();
        assert_eq!(supports.num_pyramids, pairs.north_pyramids);
    }

    #[test]
    fn test_zero_pyramids_is_reportable() {
        // Width far below half a module rounds to zero pyramids
        let poly = Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0), (10.0, 300.0), (0.0, 300.0)]);
        let est = estimate_side_supports(&poly, &grid(), 2.54, 0.5, 1.0).unwrap();
        assert_eq!(est.num_pyramids, 0);
        assert_eq!(est.total_plevra, 0);
        assert!(est.notes.contains("No pyramids"));
    }

    #[test]
    fn test_shallow_depth_is_reportable() {
        // 0.8 m depth cannot fit the two 0.5 m end offsets
        let poly = Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 4.0), (0.0, 4.0)]);
        let est = estimate_side_supports(&poly, &grid(), 2.54, 0.5, 1.0).unwrap();
        assert_eq!(est.num_pyramids, 20);
        assert_eq!(est.total_plevra, 0);
        assert!(est.usable_depth_m <= 0.0);
        assert!(est.notes.contains("too short"));
    }

    #[test]
    fn test_absent_on_bad_input() {
        assert!(estimate_side_supports(&Polygon::from_xy(&[]), &grid(), 2.54, 0.5, 1.0).is_none());
        let bad = GridSpec::new(5.0, 3.0, 0.0);
        assert!(estimate_side_supports(&rectangle(), &bad, 2.54, 0.5, 1.0).is_none());
        // Non-positive spacing cannot be scheduled
        assert!(estimate_side_supports(&rectangle(), &grid(), 2.54, 0.5, 0.0).is_none());
    }
}
