// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade brace pair (koutelou) estimation
//!
//! Koutelou pairs brace only the north and south facades. Each pyramid
//! needs two pairs: one from the low post to the tall post, one from the
//! ridge cap to the gutter. Facades sloping more than the tolerance away
//! from horizontal get no pairs at all - a reportable zero, not an absence.

use crate::facade::{classify_facades, Segment};
use crate::polygon::Polygon;
use greenhouse_model::GridSpec;
use serde::{Deserialize, Serialize};

/// Angular tolerance for a facade segment to count as regular, degrees
pub const REGULARITY_TOLERANCE_DEG: f64 = 10.0;

/// Facade pair counts with regularity diagnostics
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FacadePairEstimate {
    /// Total koutelou pairs across both facades
    pub total_pairs: u32,
    /// Pyramids counted on the north facade
    pub north_pyramids: u32,
    /// Pyramids counted on the south facade
    pub south_pyramids: u32,
    /// Whether both facades are regular (within tolerance of horizontal)
    pub is_regular: bool,
    /// Pair pipe length setting, meters (does not affect the count)
    pub pipe_length_m: f64,
    /// Grid cell width used, meters
    pub grid_w_m: f64,
    /// Pixels per meter used
    pub scale_px_per_m: f64,
    /// Human-readable derivation note
    pub notes: String,
}

/// Pyramids across a facade group and whether every member is regular
fn count_pyramids(segments: &[Segment], grid_w_px: f64) -> (u32, bool) {
    if segments.is_empty() {
        return (0, false);
    }
    if !segments
        .iter()
        .all(|s| s.is_regular(REGULARITY_TOLERANCE_DEG))
    {
        return (0, false);
    }
    let total_width_px: f64 = segments.iter().map(|s| s.length).sum();
    ((total_width_px / grid_w_px).round() as u32, true)
}

/// Estimate koutelou pairs for the north and south facades
///
/// `pipe_length_m` is carried through for reference only; the quantity is
/// `(north_pyramids + south_pyramids) * 2`. Returns `None` when either
/// facade group is empty or the grid spec is not positive; returns a
/// zero-result with `is_regular = false` when a facade is diagonal.
pub fn estimate_facade_pairs(
    polygon: &Polygon,
    grid: &GridSpec,
    pipe_length_m: f64,
) -> Option<FacadePairEstimate> {
    if !polygon.has_area_support() {
        return None;
    }
    let groups = classify_facades(polygon);
    if groups.north.is_empty() || groups.south.is_empty() {
        return None;
    }
    let grid_w_px = grid.cell_w_px();
    if grid_w_px <= 0.0 {
        return None;
    }

    let (north_pyramids, north_regular) = count_pyramids(&groups.north, grid_w_px);
    let (south_pyramids, south_regular) = count_pyramids(&groups.south, grid_w_px);
    let is_regular = north_regular && south_regular;

    if !is_regular {
        return Some(FacadePairEstimate {
            total_pairs: 0,
            north_pyramids: 0,
            south_pyramids: 0,
            is_regular: false,
            pipe_length_m,
            grid_w_m: grid.cell_w_m,
            scale_px_per_m: grid.scale_px_per_m,
            notes: "Facades are not regular (diagonal); koutelou pairs not applicable.".to_string(),
        });
    }

    let total_pyramids = north_pyramids + south_pyramids;
    Some(FacadePairEstimate {
        total_pairs: total_pyramids * 2,
        north_pyramids,
        south_pyramids,
        is_regular: true,
        pipe_length_m,
        grid_w_m: grid.cell_w_m,
        scale_px_per_m: grid.scale_px_per_m,
        notes: "Each pyramid requires 2 pairs: (low post -> tall post) + (ridge -> gutter)."
            .to_string(),
    })
}
