// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Material quantity mapping rules
//!
//! Translates the geometric estimates into per-code quantities, keeping the
//! rule set explicit and testable in one place. Inputs are the estimate
//! structs; output is an ordered list of quantity lines ready for pricing.
//! Missing estimates simply contribute nothing.

use greenhouse_geometry::{
    FacadePairEstimate, GutterEstimate, PostEstimate, SideGutterType, SideSupportEstimate,
};

const EPS: f64 = 1e-6;

/// One computed quantity awaiting pricing
#[derive(Clone, Debug, PartialEq)]
pub struct QuantityLine {
    /// Material code to price against
    pub code: String,
    /// Quantity in catalog units
    pub quantity: f64,
    /// Display-name override (e.g. the generic gutter annotated with its
    /// actual length)
    pub name_override: Option<String>,
}

/// Gutter material codes for a grid cell height: (full profile, half profile)
///
/// The generic code has no half variant; it stands in for both.
pub fn choose_gutter_codes(cell_h_m: f64) -> (&'static str, &'static str) {
    if (cell_h_m - 3.0).abs() < EPS {
        ("gutter_3m", "gutter_3m_half")
    } else if (cell_h_m - 4.0).abs() < EPS {
        ("gutter_4m", "gutter_4m_half")
    } else {
        ("gutter_piece", "gutter_piece")
    }
}

/// Append a quantity, merging into an existing line with the same code
fn push_quantity(
    lines: &mut Vec<QuantityLine>,
    code: &str,
    quantity: f64,
    name_override: Option<String>,
) {
    if quantity <= 0.0 {
        return;
    }
    if let Some(existing) = lines.iter_mut().find(|l| l.code == code) {
        existing.quantity += quantity;
        return;
    }
    lines.push(QuantityLine {
        code: code.to_string(),
        quantity,
        name_override,
    });
}

/// Ridge caps per row: apex modules, read with decreasing preference
fn apex_per_row(posts: &PostEstimate) -> f64 {
    if let Some(tall) = posts.tall_posts_per_row {
        return tall as f64;
    }
    if let Some(full) = posts.full_modules_per_row {
        let half = if posts.has_half_module_per_row == Some(true) {
            1.0
        } else {
            0.0
        };
        return full as f64 + half;
    }
    if posts.rows > 0 {
        return posts.total_tall_posts as f64 / posts.rows as f64;
    }
    0.0
}

/// Map the estimates to per-code quantities in bill order
///
/// Order: tall posts, low posts, ridge caps, gutters, facade pairs, side
/// supports - each independently gated on its quantity being positive.
pub fn estimate_material_quantities(
    posts: Option<&PostEstimate>,
    gutters: Option<&GutterEstimate>,
    facade_pairs: Option<&FacadePairEstimate>,
    side_supports: Option<&SideSupportEstimate>,
    cell_h_m: f64,
) -> Vec<QuantityLine> {
    let mut lines = Vec::new();

    // Posts
    if let Some(posts) = posts {
        push_quantity(&mut lines, "post_tall", posts.total_tall_posts as f64, None);
        push_quantity(&mut lines, "post_low", posts.total_low_posts as f64, None);
    }

    // Ridge caps sit on the module apexes and are counted along the depth
    // like the gutters: apex_per_row x round(depth / cell_h)
    if let Some(posts) = posts {
        let depth_m = if posts.depth_m > 0.0 {
            posts.depth_m
        } else {
            gutters.map(|g| g.depth_m).unwrap_or(0.0)
        };
        let rows_y = if cell_h_m > 0.0 {
            (depth_m / cell_h_m).round()
        } else {
            0.0
        };
        push_quantity(&mut lines, "ridge_cap", apex_per_row(posts) * rows_y, None);
    }

    // Gutters: the piece code follows the grid height; a generic height is
    // annotated with its actual length
    if let Some(gutters) = gutters {
        let (full_code, half_code) = choose_gutter_codes(gutters.grid_h_m);
        let generic_name = if full_code == "gutter_piece" {
            Some(format!("Gutter {}m", gutters.grid_h_m))
        } else {
            None
        };
        match gutters.split {
            Some(split) => {
                let side_code = match split.side_gutter_type {
                    SideGutterType::Half => half_code,
                    SideGutterType::Full => full_code,
                };
                push_quantity(
                    &mut lines,
                    side_code,
                    split.side_pieces as f64,
                    generic_name.clone(),
                );
                push_quantity(
                    &mut lines,
                    full_code,
                    split.internal_pieces as f64,
                    generic_name,
                );
            }
            None => {
                push_quantity(
                    &mut lines,
                    full_code,
                    gutters.total_pieces as f64,
                    generic_name,
                );
            }
        }
    }

    // Facade brace pairs, north/south only
    if let Some(pairs) = facade_pairs {
        push_quantity(&mut lines, "koutelou_pair", pairs.total_pairs as f64, None);
    }

    // Side supports along the depth
    if let Some(supports) = side_supports {
        push_quantity(&mut lines, "plevra", supports.total_plevra as f64, None);
    }

    lines
}
