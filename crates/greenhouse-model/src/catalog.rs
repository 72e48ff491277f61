// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material catalog with layered per-code overrides
//!
//! The catalog is seeded from the embedded defaults and can be overridden
//! per code by a user-defaults layer and again by a one-off price import.
//! Removing an override layer is done by rebuilding from [`MaterialCatalog::builtin`]
//! and re-applying the remaining layers; the catalog itself is a plain map.

use crate::defaults::default_material_rows;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A priced material entry
///
/// Doubles as the persistence row format: the persistence collaborator
/// serializes catalogs as sequences of these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    /// Unique material code (e.g. "post_tall")
    pub code: String,
    /// Display name
    pub name: String,
    /// Unit of sale (e.g. "piece")
    pub unit: String,
    /// Price per unit
    pub unit_price: f64,
    /// Descriptive pipe thickness (e.g. "2\"")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
    /// Descriptive height (e.g. "3.00 m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    /// Descriptive length (e.g. "2.54 m")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
}

impl MaterialItem {
    /// Create a new material item with no descriptive dimensions
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        unit_price: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: unit.into(),
            unit_price,
            thickness: None,
            height: None,
            length: None,
        }
    }

    /// Zero-priced placeholder for a code missing from the catalog
    ///
    /// The code doubles as the display name so the gap stays visible in the
    /// bill instead of silently dropping the line.
    pub fn placeholder(code: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            unit: "piece".to_string(),
            unit_price: 0.0,
            thickness: None,
            height: None,
            length: None,
        }
    }

    /// Validate a row coming from the persistence collaborator
    pub fn validate(&self, index: usize) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(Error::invalid_row(index, "empty material code"));
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(Error::invalid_row(
                index,
                format!("invalid unit price for '{}'", self.code),
            ));
        }
        Ok(())
    }
}

/// Mapping from material code to material item
///
/// Owned by the estimation session; items are exclusively owned by the
/// catalog (lookups clone, they never alias).
#[derive(Clone, Debug, Default)]
pub struct MaterialCatalog {
    items: FxHashMap<String, MaterialItem>,
}

impl MaterialCatalog {
    /// Empty catalog
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog seeded with the embedded defaults
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for item in default_material_rows() {
            catalog.items.insert(item.code.clone(), item);
        }
        catalog
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a material by code
    pub fn get(&self, code: &str) -> Option<&MaterialItem> {
        self.items.get(code)
    }

    /// Look up a material by code, synthesizing a zero-priced placeholder
    /// when the code is unknown
    pub fn get_or_placeholder(&self, code: &str) -> MaterialItem {
        self.items
            .get(code)
            .cloned()
            .unwrap_or_else(|| MaterialItem::placeholder(code))
    }

    /// Insert or replace a single item
    pub fn insert(&mut self, item: MaterialItem) {
        self.items.insert(item.code.clone(), item);
    }

    /// Update the price of an existing entry; returns false if the code is
    /// unknown
    pub fn set_unit_price(&mut self, code: &str, unit_price: f64) -> bool {
        match self.items.get_mut(code) {
            Some(item) => {
                item.unit_price = unit_price;
                true
            }
            None => false,
        }
    }

    /// Apply an override layer (user defaults or a one-off import)
    ///
    /// Rows are validated before any of them is applied, so a bad row leaves
    /// the catalog untouched. Returns the number of rows applied.
    pub fn apply_overrides<I>(&mut self, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = MaterialItem>,
    {
        let rows: Vec<MaterialItem> = rows.into_iter().collect();
        for (index, row) in rows.iter().enumerate() {
            row.validate(index)?;
        }
        let count = rows.len();
        for row in rows {
            self.items.insert(row.code.clone(), row);
        }
        Ok(count)
    }

    /// Serialize the catalog back to persistence rows, ordered by code
    pub fn to_rows(&self) -> Vec<MaterialItem> {
        let mut rows: Vec<MaterialItem> = self.items.values().cloned().collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));
        rows
    }

    /// Iterate over all entries (unordered)
    pub fn iter(&self) -> impl Iterator<Item = &MaterialItem> {
        self.items.values()
    }
}
