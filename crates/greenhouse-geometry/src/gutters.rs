// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Drainage gutter estimation
//!
//! Vertical gutter lines run along the depth at every module boundary plus
//! the two outer edges; each line is covered by pieces one grid cell height
//! long. The optional side/internal split designates the outermost two
//! lines separately so they can be priced as half-profile pieces.

use crate::facade::classify_facades;
use crate::polygon::Polygon;
use greenhouse_model::{FacadeDirection, GridSpec};
use serde::{Deserialize, Serialize};

/// Profile choice for the two outermost gutter lines
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SideGutterType {
    /// Side lines use the full gutter profile
    #[default]
    Full,
    /// Side lines use the half gutter profile
    Half,
}

/// Configuration for the gutter estimator
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GutterOptions {
    /// Partition pieces into side (outermost lines) and internal lines
    pub split_side_pieces: bool,
    /// Profile used for side pieces when splitting
    pub side_gutter_type: SideGutterType,
}

/// Side/internal piece partition (present when requested via options)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GutterSplit {
    /// Pieces on the leftmost and rightmost lines
    pub side_pieces: u32,
    /// Pieces on all remaining lines
    pub internal_pieces: u32,
    /// Profile used for the side pieces
    pub side_gutter_type: SideGutterType,
}

/// Gutter counts with the measurements they were derived from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GutterEstimate {
    /// Grid cell width used, meters
    pub grid_w_m: f64,
    /// Grid cell height used, meters (also the piece length)
    pub grid_h_m: f64,
    /// Pixels per meter used
    pub scale_px_per_m: f64,
    /// Total north facade length, meters
    pub north_width_m: f64,
    /// North-to-south depth, meters
    pub depth_m: f64,
    /// Module width along the north base, meters
    pub module_w_m: f64,
    /// Full modules across the width
    pub n_full_modules: u32,
    /// Vertical gutter lines across the width (at least 2)
    pub lines_x: u32,
    /// Length of one gutter piece, meters
    pub piece_len_m: f64,
    /// Pieces needed to cover one line
    pub pieces_per_line: u32,
    /// Total pieces across all lines
    pub total_pieces: u32,
    /// Side/internal partition, when requested
    pub split: Option<GutterSplit>,
    /// Human-readable derivation note
    pub notes: String,
}

/// Estimate drainage gutter pieces
///
/// Width comes from the summed north facade lengths, depth from the
/// averaged north/south reference lines. Returns `None` when either facade
/// group is empty or the grid spec is not positive.
pub fn estimate_gutters(
    polygon: &Polygon,
    grid: &GridSpec,
    options: &GutterOptions,
) -> Option<GutterEstimate> {
    if !polygon.has_area_support() {
        return None;
    }
    let groups = classify_facades(polygon);
    if groups.north.is_empty() || groups.south.is_empty() {
        return None;
    }
    if grid.scale_px_per_m <= 0.0 {
        return None;
    }

    let north_length_px = groups.total_length(FacadeDirection::North);
    let north_y = groups.average_y(FacadeDirection::North)?;
    let south_y = groups.average_y(FacadeDirection::South)?;
    let depth_px = (south_y - north_y).max(0.0);

    let width_m = grid.px_to_m(north_length_px);
    let depth_m = grid.px_to_m(depth_px);

    // Gutter lines align with the module boundaries (one module per cell)
    let module_w_m = grid.cell_w_m;
    if module_w_m <= 0.0 || grid.cell_h_m <= 0.0 {
        return None;
    }
    let n_full = (width_m / module_w_m).floor() as u32;
    let lines_x = (n_full + 1).max(2);

    let piece_len_m = grid.cell_h_m;
    let pieces_per_line = (depth_m / piece_len_m).ceil() as u32;
    let total_pieces = lines_x * pieces_per_line;

    let split = options.split_side_pieces.then(|| GutterSplit {
        side_pieces: 2 * pieces_per_line,
        internal_pieces: (lines_x - 2) * pieces_per_line,
        side_gutter_type: options.side_gutter_type,
    });

    Some(GutterEstimate {
        grid_w_m: grid.cell_w_m,
        grid_h_m: grid.cell_h_m,
        scale_px_per_m: grid.scale_px_per_m,
        north_width_m: width_m,
        depth_m,
        module_w_m,
        n_full_modules: n_full,
        lines_x,
        piece_len_m,
        pieces_per_line,
        total_pieces,
        split,
        notes: "lines_x = max(2, floor(width/grid_w)+1); pieces_per_line = ceil(depth/grid_h)."
            .to_string(),
    })
}
