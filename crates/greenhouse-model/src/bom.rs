// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bill-of-materials data types
//!
//! A bill is created fresh on every computation and never mutated in place,
//! with one exception: explicit user price edits go through
//! [`BillOfMaterials::set_unit_price`], which recomputes the affected line
//! totals and the subtotal.

use serde::{Deserialize, Serialize};

/// One priced line of the bill
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    /// Material code
    pub code: String,
    /// Display name, possibly annotated (e.g. generic gutter length)
    pub name: String,
    /// Unit of sale
    pub unit: String,
    /// Quantity in units
    pub quantity: f64,
    /// Price per unit
    pub unit_price: f64,
    /// quantity x unit_price
    pub total: f64,
}

impl BillLine {
    /// Create a line, computing its total
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            unit: unit.into(),
            quantity,
            unit_price,
            total: quantity * unit_price,
        }
    }
}

/// Ordered priced line items plus subtotal
///
/// Rounding of the subtotal is deferred to presentation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    /// Line items in mapping order
    pub lines: Vec<BillLine>,
    /// Sum of line totals
    pub subtotal: f64,
    /// Currency code (e.g. "EUR")
    pub currency: String,
}

impl BillOfMaterials {
    /// Create a bill from lines, computing the subtotal
    pub fn new(lines: Vec<BillLine>, currency: impl Into<String>) -> Self {
        let subtotal = lines.iter().map(|l| l.total).sum();
        Self {
            lines,
            subtotal,
            currency: currency.into(),
        }
    }

    /// Empty bill
    pub fn empty(currency: impl Into<String>) -> Self {
        Self::new(Vec::new(), currency)
    }

    /// Apply a user price edit to every line with the given code
    ///
    /// Recomputes the edited line totals and the subtotal; all other lines
    /// are left untouched. Returns the number of lines affected.
    pub fn set_unit_price(&mut self, code: &str, unit_price: f64) -> usize {
        let mut affected = 0;
        for line in self.lines.iter_mut().filter(|l| l.code == code) {
            line.unit_price = unit_price;
            line.total = line.quantity * unit_price;
            affected += 1;
        }
        if affected > 0 {
            self.subtotal = self.lines.iter().map(|l| l.total).sum();
        }
        affected
    }
}
