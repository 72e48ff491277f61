// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Greenhouse BOM - priced bill-of-materials builder
//!
//! Maps the quantity estimates from `greenhouse-geometry` to priced catalog
//! entries and produces an ordered [`BillOfMaterials`](greenhouse_model::BillOfMaterials).
//!
//! The mapping rules live in [`quantities`]; the [`Estimator`] session in
//! [`builder`] owns the catalog and prices the mapped quantities. The
//! builder never fails: codes missing from the catalog show up as visible
//! zero-priced lines.
//!
//! ## Example
//!
//! ```
//! use greenhouse_bom::Estimator;
//! use greenhouse_geometry::{estimate_posts, Polygon};
//! use greenhouse_model::GridSpec;
//!
//! let polygon = Polygon::from_xy(&[
//!     (0.0, 0.0),
//!     (500.0, 0.0),
//!     (500.0, 300.0),
//!     (0.0, 300.0),
//! ]);
//! let grid = GridSpec::new(5.0, 3.0, 5.0);
//! let posts = estimate_posts(&polygon, &grid);
//!
//! let estimator = Estimator::default();
//! let bill = estimator.compute_bom(posts.as_ref(), None, None, None, grid.cell_h_m, None);
//! assert!(bill.subtotal > 0.0);
//! ```

pub mod builder;
pub mod quantities;

// Re-export main types
pub use builder::{BomAnnotations, Estimator};
pub use quantities::{choose_gutter_codes, estimate_material_quantities, QuantityLine};
