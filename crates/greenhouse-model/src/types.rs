// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core value types shared across the estimation pipeline

use serde::{Deserialize, Serialize};
use std::fmt;

/// Drawing grid specification
///
/// The canvas works in pixels; all estimation formulas work in meters. The
/// grid spec ties the two together: one grid cell is `cell_w_m` x `cell_h_m`
/// meters, drawn at `scale_px_per_m` pixels per meter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Grid cell width in meters
    pub cell_w_m: f64,
    /// Grid cell height in meters
    pub cell_h_m: f64,
    /// Pixels per meter conversion factor
    pub scale_px_per_m: f64,
}

impl GridSpec {
    /// Create a new grid spec
    pub fn new(cell_w_m: f64, cell_h_m: f64, scale_px_per_m: f64) -> Self {
        Self {
            cell_w_m,
            cell_h_m,
            scale_px_per_m,
        }
    }

    /// All three values must be strictly positive for any estimator to
    /// produce output
    pub fn is_valid(&self) -> bool {
        self.cell_w_m > 0.0 && self.cell_h_m > 0.0 && self.scale_px_per_m > 0.0
    }

    /// Grid cell width in scaled pixel units
    pub fn cell_w_px(&self) -> f64 {
        self.cell_w_m * self.scale_px_per_m
    }

    /// Grid cell height in scaled pixel units
    pub fn cell_h_px(&self) -> f64 {
        self.cell_h_m * self.scale_px_per_m
    }

    /// Convert a pixel measure to meters (0 when the scale is not positive)
    pub fn px_to_m(&self, px: f64) -> f64 {
        if self.scale_px_per_m > 0.0 {
            px / self.scale_px_per_m
        } else {
            0.0
        }
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        // The standard 5m x 3m greenhouse module at 5 px/m
        Self {
            cell_w_m: 5.0,
            cell_h_m: 3.0,
            scale_px_per_m: 5.0,
        }
    }
}

/// Directional bucket a polygon edge is classified into
///
/// Screen convention: +y grows downward, so North is the smallest-y side.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FacadeDirection {
    North,
    South,
    East,
    West,
}

impl FacadeDirection {
    /// All four directions in display order
    pub const ALL: [FacadeDirection; 4] = [
        FacadeDirection::North,
        FacadeDirection::South,
        FacadeDirection::East,
        FacadeDirection::West,
    ];

    /// Overlay color for this direction as RGBA (0.0-1.0)
    pub fn color(&self) -> [f32; 4] {
        match self {
            // North - blue
            FacadeDirection::North => [0.25, 0.45, 0.85, 1.0],
            // South - red
            FacadeDirection::South => [0.85, 0.30, 0.25, 1.0],
            // East - green
            FacadeDirection::East => [0.30, 0.70, 0.35, 1.0],
            // West - orange
            FacadeDirection::West => [0.90, 0.60, 0.20, 1.0],
        }
    }
}

impl fmt::Display for FacadeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Greek labels, matching the drawing application's vocabulary
        let label = match self {
            FacadeDirection::North => "Βόρεια",
            FacadeDirection::South => "Νότια",
            FacadeDirection::East => "Ανατολικά",
            FacadeDirection::West => "Δυτικά",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_spec_validity() {
        assert!(GridSpec::default().is_valid());
        assert!(!GridSpec::new(0.0, 3.0, 5.0).is_valid());
        assert!(!GridSpec::new(5.0, -3.0, 5.0).is_valid());
        assert!(!GridSpec::new(5.0, 3.0, 0.0).is_valid());
    }

    #[test]
    fn test_grid_spec_pixel_sizes() {
        let grid = GridSpec::new(5.0, 3.0, 5.0);
        assert_eq!(grid.cell_w_px(), 25.0);
        assert_eq!(grid.cell_h_px(), 15.0);
        assert_eq!(grid.px_to_m(100.0), 20.0);
    }

    #[test]
    fn test_px_to_m_zero_scale() {
        let grid = GridSpec::new(5.0, 3.0, 0.0);
        assert_eq!(grid.px_to_m(100.0), 0.0);
    }

    #[test]
    fn test_facade_direction_labels() {
        assert_eq!(FacadeDirection::North.to_string(), "Βόρεια");
        assert_eq!(FacadeDirection::West.to_string(), "Δυτικά");
    }

    #[test]
    fn test_grid_spec_serde_round_trip() {
        let grid = GridSpec::new(5.0, 4.0, 7.5);
        let json = serde_json::to_string(&grid).unwrap();
        let back: GridSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, back);
    }
}
