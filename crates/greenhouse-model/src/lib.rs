// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Greenhouse-Model - Shared types for greenhouse layout estimation
//!
//! This crate provides the data model shared by the geometry engine and the
//! bill-of-materials builder:
//!
//! - [`GridSpec`] - the drawing grid (cell size in meters, pixels-per-meter scale)
//! - [`FacadeDirection`] - the four directional buckets polygon edges fall into
//! - [`MaterialItem`] / [`MaterialCatalog`] - priced material entries with
//!   embedded defaults and per-code override layers
//! - [`BillLine`] / [`BillOfMaterials`] - the priced estimation output
//!
//! The crate is deliberately free of geometry code; it only holds plain,
//! serializable values so display and persistence collaborators can consume
//! them directly.
//!
//! # Example
//!
//! ```
//! use greenhouse_model::{GridSpec, MaterialCatalog};
//!
//! let grid = GridSpec::new(5.0, 3.0, 5.0);
//! assert!(grid.is_valid());
//! assert_eq!(grid.cell_w_px(), 25.0);
//!
//! let catalog = MaterialCatalog::builtin();
//! assert!(catalog.get("post_tall").is_some());
//! ```

pub mod bom;
pub mod catalog;
pub mod defaults;
pub mod error;
pub mod types;

// Re-export all public types
pub use bom::*;
pub use catalog::*;
pub use defaults::*;
pub use error::*;
pub use types::*;
