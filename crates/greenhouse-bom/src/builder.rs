// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bill-of-materials builder
//!
//! Owns the material catalog for an estimation session and prices the
//! quantity lines produced by the mapping rules. Unknown codes price as
//! zero rather than failing, so the worst case is an all-placeholder bill.

use crate::quantities::estimate_material_quantities;
use greenhouse_geometry::{
    FacadePairEstimate, GutterEstimate, PostEstimate, SideSupportEstimate,
};
use greenhouse_model::{BillLine, BillOfMaterials, MaterialCatalog};
use rustc_hash::FxHashMap;

/// Per-code display-name notes (e.g. price import status)
///
/// Passed explicitly into [`Estimator::compute_bom`] instead of living in
/// process-wide state; the presentation layer owns its lifetime.
pub type BomAnnotations = FxHashMap<String, String>;

/// Estimation session: catalog plus currency
///
/// Price edits go through [`Estimator::catalog_mut`] and take effect on the
/// next [`Estimator::compute_bom`] call; bills already produced are only
/// revised through their own explicit edit API.
#[derive(Clone, Debug)]
pub struct Estimator {
    catalog: MaterialCatalog,
    currency: String,
}

impl Estimator {
    /// Create a session around a catalog, billing in EUR
    pub fn new(catalog: MaterialCatalog) -> Self {
        Self::with_currency(catalog, "EUR")
    }

    /// Create a session with an explicit currency code
    pub fn with_currency(catalog: MaterialCatalog, currency: impl Into<String>) -> Self {
        Self {
            catalog,
            currency: currency.into(),
        }
    }

    /// Session catalog
    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    /// Mutable session catalog, for user price edits
    pub fn catalog_mut(&mut self) -> &mut MaterialCatalog {
        &mut self.catalog
    }

    /// Billing currency code
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Build a priced bill from the geometry estimates
    ///
    /// Every estimate is optional; absent estimates contribute no lines.
    /// `cell_h_m` selects the gutter piece code and scales the ridge cap
    /// count. `annotations` notes are appended to the matching display
    /// names.
    pub fn compute_bom(
        &self,
        posts: Option<&PostEstimate>,
        gutters: Option<&GutterEstimate>,
        facade_pairs: Option<&FacadePairEstimate>,
        side_supports: Option<&SideSupportEstimate>,
        cell_h_m: f64,
        annotations: Option<&BomAnnotations>,
    ) -> BillOfMaterials {
        let quantities =
            estimate_material_quantities(posts, gutters, facade_pairs, side_supports, cell_h_m);

        let mut lines = Vec::with_capacity(quantities.len());
        for q in quantities {
            let material = self.catalog.get_or_placeholder(&q.code);
            let mut name = q.name_override.unwrap_or_else(|| material.name.clone());
            if let Some(note) = annotations.and_then(|a| a.get(&q.code)) {
                name = format!("{} ({})", name, note);
            }
            lines.push(BillLine::new(
                material.code,
                name,
                material.unit,
                q.quantity,
                material.unit_price,
            ));
        }

        log::debug!("bill computed: {} lines", lines.len());
        BillOfMaterials::new(lines, self.currency.clone())
    }
}

impl Default for Estimator {
    fn default() -> Self {
        Self::new(MaterialCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greenhouse_geometry::{
        estimate_facade_pairs, estimate_gutters, estimate_posts, estimate_side_supports,
        GutterOptions, Polygon,
    };
    use greenhouse_model::GridSpec;

    fn grid() -> GridSpec {
        GridSpec::new(5.0, 3.0, 5.0)
    }

    fn rectangle() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 300.0), (0.0, 300.0)])
    }

    fn full_bill(estimator: &Estimator) -> BillOfMaterials {
        let poly = rectangle();
        let posts = estimate_posts(&poly, &grid()).unwrap();
        let gutters = estimate_gutters(&poly, &grid(), &GutterOptions::default()).unwrap();
        let pairs = estimate_facade_pairs(&poly, &grid(), 2.54).unwrap();
        let supports = estimate_side_supports(&poly, &grid(), 2.54, 0.5, 1.0).unwrap();
        estimator.compute_bom(
            Some(&posts),
            Some(&gutters),
            Some(&pairs),
            Some(&supports),
            3.0,
            None,
        )
    }

    #[test]
    fn test_bill_prices_known_codes() {
        let bill = full_bill(&Estimator::default());
        let tall = bill.lines.iter().find(|l| l.code == "post_tall").unwrap();
        assert_eq!(tall.quantity, 420.0);
        assert_eq!(tall.unit_price, 18.50);
        assert_eq!(tall.total, 420.0 * 18.50);
        assert_eq!(bill.currency, "EUR");
    }

    #[test]
    fn test_unpriced_codes_stay_visible_at_zero() {
        // koutelou_pair and plevra have no built-in price; the lines must
        // still appear so the gap is visible
        let bill = full_bill(&Estimator::default());
        let pair = bill.lines.iter().find(|l| l.code == "koutelou_pair").unwrap();
        assert_eq!(pair.quantity, 80.0);
        assert_eq!(pair.unit_price, 0.0);
        assert_eq!(pair.name, "koutelou_pair");
    }

    #[test]
    fn test_determinism() {
        let estimator = Estimator::default();
        let a = full_bill(&estimator);
        let b = full_bill(&estimator);
        assert_eq!(a, b);
        assert_eq!(a.subtotal.to_bits(), b.subtotal.to_bits());
    }

    #[test]
    fn test_price_edit_changes_exactly_one_line() {
        let mut estimator = Estimator::default();
        let before = full_bill(&estimator);
        estimator.catalog_mut().set_unit_price("post_low", 14.00);
        let after = full_bill(&estimator);

        for (old, new) in before.lines.iter().zip(&after.lines) {
            if old.code == "post_low" {
                assert_eq!(new.total, old.quantity * 14.00);
            } else {
                assert_eq!(old, new);
            }
        }
        assert_ne!(before.subtotal, after.subtotal);
    }

    #[test]
    fn test_empty_inputs_produce_empty_bill() {
        let bill = Estimator::default().compute_bom(None, None, None, None, 3.0, None);
        assert!(bill.lines.is_empty());
        assert_eq!(bill.subtotal, 0.0);
    }

    #[test]
    fn test_annotations_append_to_names() {
        let mut annotations = BomAnnotations::default();
        annotations.insert("post_tall".to_string(), "imported".to_string());
        let poly = rectangle();
        let posts = estimate_posts(&poly, &grid()).unwrap();
        let bill = Estimator::default().compute_bom(
            Some(&posts),
            None,
            None,
            None,
            3.0,
            Some(&annotations),
        );
        let tall = bill.lines.iter().find(|l| l.code == "post_tall").unwrap();
        assert_eq!(tall.name, "Κολόνα Υψηλή (imported)");
        let low = bill.lines.iter().find(|l| l.code == "post_low").unwrap();
        assert_eq!(low.name, "Κολόνα Χαμηλή");
    }
}
