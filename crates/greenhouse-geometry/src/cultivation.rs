// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cultivation pipe estimation
//!
//! Cultivation pipes run parallel to the width to carry the plant support
//! wire, spaced one grid cell height apart along the depth. Pieces are
//! distributed across three mounting zones in a fixed 1:2:1 split, with the
//! middle zone absorbing the rounding remainder.

use crate::polygon::Polygon;
use serde::{Deserialize, Serialize};

/// Mounting zone labels, in the grower's vocabulary
pub const ZONE_LEFT: &str = "πάτημα-στένεμα";
pub const ZONE_MIDDLE: &str = "στένεμα-ανοιχτό";
pub const ZONE_RIGHT: &str = "πάτημα-ανοιχτό";

/// Cultivation pipe counts with the measurements they were derived from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CultivationEstimate {
    /// Total pipe pieces
    pub total_pipes: u32,
    /// Total pipe length, meters
    pub total_meters: f64,
    /// Number of parallel pipe lines along the depth
    pub num_lines: u32,
    /// Bounding-box width, meters
    pub width_m: f64,
    /// Bounding-box depth, meters
    pub depth_m: f64,
    /// Length of one pipe piece, meters
    pub pipe_length_m: f64,
    /// Pieces in the left zone
    pub left_pieces: u32,
    /// Pieces in the middle zone
    pub middle_pieces: u32,
    /// Pieces in the right zone
    pub right_pieces: u32,
    /// Grid cell height used for the line spacing, meters
    pub grid_h_m: f64,
    /// Pixels per meter used
    pub scale_px_per_m: f64,
    /// Human-readable derivation note
    pub notes: String,
}

/// Estimate cultivation pipes from the perimeter bounding box
///
/// Uses the overall bounding box rather than facade groups. Returns `None`
/// unless width, depth, line spacing, pipe length and scale are all
/// strictly positive.
pub fn estimate_cultivation_pipes(
    polygon: &Polygon,
    scale_px_per_m: f64,
    cell_h_m: f64,
    pipe_length_m: f64,
) -> Option<CultivationEstimate> {
    if !polygon.has_area_support() || scale_px_per_m <= 0.0 {
        return None;
    }
    let (min, max) = polygon.bounding_box()?;
    let width_m = (max.x - min.x) / scale_px_per_m;
    let depth_m = (max.y - min.y) / scale_px_per_m;
    if width_m <= 0.0 || depth_m <= 0.0 || cell_h_m <= 0.0 || pipe_length_m <= 0.0 {
        return None;
    }

    // Lines at both edges plus one per spacing interval
    let num_lines = (depth_m / cell_h_m).floor() as u32 + 1;
    let total_meters = num_lines as f64 * width_m;
    let total_pipes = (total_meters / pipe_length_m).ceil() as u32;

    // 1:2:1 zone split; the middle absorbs the rounding remainder
    let left_pieces = (total_pipes as f64 / 4.0).round() as u32;
    let right_pieces = (total_pipes as f64 / 4.0).round() as u32;
    let middle_pieces = total_pipes - left_pieces - right_pieces;

    Some(CultivationEstimate {
        total_pipes,
        total_meters,
        num_lines,
        width_m,
        depth_m,
        pipe_length_m,
        left_pieces,
        middle_pieces,
        right_pieces,
        grid_h_m: cell_h_m,
        scale_px_per_m,
        notes: format!(
            "Pipes run parallel to the width, one line every {}m of depth; zones {} / {} / {}.",
            cell_h_m, ZONE_LEFT, ZONE_MIDDLE, ZONE_RIGHT
        ),
    })
}
