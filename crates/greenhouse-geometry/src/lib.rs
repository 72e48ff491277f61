// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Greenhouse Geometry - perimeter analysis and quantity estimation
//!
//! Pure geometric analysis of a drawn greenhouse perimeter: the polygon
//! arrives from the canvas as an ordered vertex list in scaled pixel units
//! (y grows downward), together with a [`GridSpec`] tying pixels to meters.
//!
//! ## Pipeline
//!
//! - **Facade classification**: every perimeter edge lands in one of four
//!   directional groups ([`classify_facades`])
//! - **Grid coverage**: full/partial cell intersection against the drawing
//!   grid ([`compute_grid_coverage`])
//! - **Quantity estimators**: posts, gutters, facade pairs, side supports
//!   and cultivation pipes, each a pure function of the polygon and grid
//! - **Post bucketing and corner detection** ([`classify_posts`],
//!   [`detect_corners`])
//!
//! Estimators return `None` when the input is insufficient (too few
//! vertices, empty facade groups, non-positive grid); legitimate zero
//! outcomes come back as populated results with a note, so diagnostic
//! fields keep their meaning.
//!
//! ## Example
//!
//! ```
//! use greenhouse_geometry::{estimate_posts, Polygon};
//! use greenhouse_model::GridSpec;
//!
//! // 100 m x 60 m perimeter at 5 px/m on the 5 m x 3 m grid
//! let polygon = Polygon::from_xy(&[
//!     (0.0, 0.0),
//!     (500.0, 0.0),
//!     (500.0, 300.0),
//!     (0.0, 300.0),
//! ]);
//! let grid = GridSpec::new(5.0, 3.0, 5.0);
//!
//! let posts = estimate_posts(&polygon, &grid).unwrap();
//! assert_eq!(posts.total_low_posts, 441);
//! assert_eq!(posts.total_tall_posts, 420);
//! ```

pub mod classify;
pub mod coverage;
pub mod cultivation;
pub mod facade;
pub mod facade_pairs;
pub mod gutters;
pub mod polygon;
pub mod posts;
pub mod side_supports;

// Re-export nalgebra point types for convenience
pub use nalgebra::{Point2, Vector2};

// Re-export main types and entry points
pub use classify::{
    classify_posts, detect_corners, Corner, CornerReport, LocationCounts, PostDistribution,
};
pub use coverage::{
    compute_grid_box_counts, compute_grid_coverage, GridCoverage, PartialBox, PartialCell,
};
pub use cultivation::{estimate_cultivation_pipes, CultivationEstimate};
pub use facade::{classify_facades, FacadeGroups, Segment};
pub use facade_pairs::{estimate_facade_pairs, FacadePairEstimate, REGULARITY_TOLERANCE_DEG};
pub use gutters::{estimate_gutters, GutterEstimate, GutterOptions, GutterSplit, SideGutterType};
pub use polygon::Polygon;
pub use posts::{estimate_posts, estimate_posts_per_row, PostEstimate};
pub use side_supports::{estimate_side_supports, SideSupportEstimate};

// Re-export the grid spec alongside the estimators that consume it
pub use greenhouse_model::GridSpec;
