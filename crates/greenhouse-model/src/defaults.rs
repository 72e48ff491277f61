// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Embedded default materials catalog
//!
//! Modify [`MATERIAL_DEFAULTS`] to add or update built-in material items.
//! Users can supply override rows at runtime instead of editing this file;
//! dropping the override layer restores these values.
//!
//! Codes referenced by the bill builder but absent here (facade pairs, side
//! supports, half-length gutters) intentionally resolve to zero-priced
//! placeholders until the user prices them.

use crate::catalog::MaterialItem;

/// Built-in materials: (code, name, unit, unit_price)
pub const MATERIAL_DEFAULTS: [(&str, &str, &str, f64); 6] = [
    ("post_tall", "Κολόνα Υψηλή", "piece", 18.50),
    ("post_low", "Κολόνα Χαμηλή", "piece", 12.90),
    ("ridge_cap", "Κορφιάτης", "piece", 7.20),
    ("gutter_3m", "Υδρορροή 3m", "piece", 9.80),
    ("gutter_4m", "Υδρορροή 4m", "piece", 12.40),
    // Generic fallback when the grid height is neither 3m nor 4m
    ("gutter_piece", "Υδρορροή (κομμάτι)", "piece", 10.50),
];

/// Materialize the embedded defaults as catalog rows
pub fn default_material_rows() -> Vec<MaterialItem> {
    MATERIAL_DEFAULTS
        .iter()
        .map(|(code, name, unit, price)| MaterialItem::new(*code, *name, *unit, *price))
        .collect()
}
