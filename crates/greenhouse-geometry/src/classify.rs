// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Post location bucketing and corner detection
//!
//! The bucketing works on the aggregate counts already produced by the post
//! estimator; individual post positions are never derived. It is an
//! approximation for display purposes: the first and last rows go to the
//! north and south buckets, intermediate rows contribute two side posts
//! each, and the remainder is counted as internal.

use crate::polygon::Polygon;
use crate::posts::PostEstimate;
use serde::{Deserialize, Serialize};

/// Post counts per location bucket
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCounts {
    pub north: u32,
    pub south: u32,
    pub east: u32,
    pub west: u32,
    pub internal: u32,
}

impl LocationCounts {
    /// Sum over all buckets
    pub fn total(&self) -> u32 {
        self.north + self.south + self.east + self.west + self.internal
    }
}

/// Location bucketing for both post kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDistribution {
    pub tall: LocationCounts,
    pub low: LocationCounts,
}

/// Bucket one post kind from its aggregates
fn distribute(total: u32, per_row: u32, rows: u32) -> LocationCounts {
    let north = if rows > 0 { per_row } else { 0 };
    let south = north;
    let sides = if rows > 2 { (rows - 2) * 2 } else { 0 };
    // Odd side remainder goes east
    let east = sides - sides / 2;
    let west = sides / 2;
    let internal = total.saturating_sub(north + south + sides);
    LocationCounts {
        north,
        south,
        east,
        west,
        internal,
    }
}

/// Distribute the estimated posts into location buckets
///
/// Positions are not tracked; this is a coarse split of the totals from
/// [`crate::posts::estimate_posts`]. Returns `None` when the perimeter is
/// empty. Estimates from the per-row scan carry no per-row figures, so
/// their posts all land in the internal bucket.
pub fn classify_posts(estimate: &PostEstimate, polygon: &Polygon) -> Option<PostDistribution> {
    if polygon.is_empty() {
        return None;
    }
    let tall_per_row = estimate.tall_posts_per_row.unwrap_or(0);
    let low_per_row = estimate.low_posts_per_row.unwrap_or(0);
    Some(PostDistribution {
        tall: distribute(estimate.total_tall_posts, tall_per_row, estimate.rows),
        low: distribute(estimate.total_low_posts, low_per_row, estimate.rows),
    })
}

/// One classified polygon corner
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Vertex position (x, y)
    pub position: [f64; 2],
    /// Turning angle at the vertex, degrees in [0, 360)
    pub angle_deg: f64,
    /// Vertex index in the input sequence
    pub index: usize,
}

/// Corners split into convex (internal) and concave (external)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CornerReport {
    /// Convex corners (angle below 180 degrees)
    pub internal: Vec<Corner>,
    /// Concave corners (angle above 180 degrees)
    pub external: Vec<Corner>,
}

/// Classify each vertex as convex or concave by its signed turning angle
///
/// The angle between the incoming and outgoing edge vectors is taken via
/// `atan2(cross, dot)` and normalized to [0, 360). The sign convention
/// depends on the winding, so the polygon's signed area decides whether the
/// angle is mirrored - convex corners always land below 180 degrees.
/// Vertices within `angle_tolerance_deg` of a straight 180 degrees are
/// skipped entirely.
pub fn detect_corners(polygon: &Polygon, angle_tolerance_deg: f64) -> CornerReport {
    let mut report = CornerReport::default();
    let pts = polygon.open_points();
    let n = pts.len();
    if n < 3 {
        return report;
    }

    // Shoelace sign over the open vertex ring (screen coordinates)
    let mut signed_sum = 0.0;
    for i in 0..n {
        let p = pts[i];
        let q = pts[(i + 1) % n];
        signed_sum += p.x * q.y - q.x * p.y;
    }
    let mirror = signed_sum > 0.0;

    for i in 0..n {
        let p_prev = pts[(i + n - 1) % n];
        let p_curr = pts[i];
        let p_next = pts[(i + 1) % n];

        let v1 = p_prev - p_curr;
        let v2 = p_next - p_curr;
        let cross = v1.x * v2.y - v1.y * v2.x;
        let dot = v1.x * v2.x + v1.y * v2.y;

        let mut angle_deg = cross.atan2(dot).to_degrees();
        if angle_deg < 0.0 {
            angle_deg += 360.0;
        }
        if mirror {
            angle_deg = (360.0 - angle_deg) % 360.0;
        }

        // Nearly straight vertices belong to neither bucket
        if (angle_deg - 180.0).abs() < angle_tolerance_deg {
            continue;
        }

        let corner = Corner {
            position: [p_curr.x, p_curr.y],
            angle_deg,
            index: i,
        };
        if angle_deg < 180.0 {
            report.internal.push(corner);
        } else {
            report.external.push(corner);
        }
    }
    report
}
