// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Facade classification of perimeter edges
//!
//! Every polygon edge lands in exactly one of the four facade groups.
//! Orientation decides horizontal vs. vertical (45 degrees each way), the
//! edge midpoint relative to the bounding-box center decides which side.

use crate::polygon::Polygon;
use greenhouse_model::FacadeDirection;
use serde::{Deserialize, Serialize};

/// One perimeter edge with derived measurements
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Start vertex (x, y)
    pub p1: [f64; 2],
    /// End vertex (x, y)
    pub p2: [f64; 2],
    /// Edge midpoint (x, y)
    pub midpoint: [f64; 2],
    /// Edge length in pixels
    pub length: f64,
    /// atan2(dy, dx) in degrees, in [-180, 180] (screen coordinates)
    pub angle_deg: f64,
    /// Starting vertex index in the input sequence
    pub index: usize,
}

impl Segment {
    /// Derive a segment from two vertices
    pub fn new(p1: [f64; 2], p2: [f64; 2], index: usize) -> Self {
        let dx = p2[0] - p1[0];
        let dy = p2[1] - p1[1];
        Self {
            p1,
            p2,
            midpoint: [(p1[0] + p2[0]) * 0.5, (p1[1] + p2[1]) * 0.5],
            length: (dx * dx + dy * dy).sqrt(),
            angle_deg: dy.atan2(dx).to_degrees(),
            index,
        }
    }

    /// Horizontal class: within 45 degrees of the x-axis either way
    pub fn is_horizontal(&self) -> bool {
        let a = self.angle_deg.abs();
        a <= 45.0 || a >= 135.0
    }

    /// Whether the segment is within `tolerance_deg` of exactly horizontal
    /// (0 or 180 degrees)
    pub fn is_regular(&self, tolerance_deg: f64) -> bool {
        let a = self.angle_deg.abs();
        a <= tolerance_deg || (a - 180.0).abs() <= tolerance_deg
    }
}

/// The four facade groups partitioning the perimeter edge set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FacadeGroups {
    pub north: Vec<Segment>,
    pub south: Vec<Segment>,
    pub east: Vec<Segment>,
    pub west: Vec<Segment>,
}

impl FacadeGroups {
    /// Segments of one direction
    pub fn get(&self, direction: FacadeDirection) -> &[Segment] {
        match direction {
            FacadeDirection::North => &self.north,
            FacadeDirection::South => &self.south,
            FacadeDirection::East => &self.east,
            FacadeDirection::West => &self.west,
        }
    }

    /// Total number of classified segments
    pub fn segment_count(&self) -> usize {
        self.north.len() + self.south.len() + self.east.len() + self.west.len()
    }

    /// Sum of segment lengths in one direction, in pixels
    pub fn total_length(&self, direction: FacadeDirection) -> f64 {
        self.get(direction).iter().map(|s| s.length).sum()
    }

    /// Average y over all segment endpoints of one direction
    ///
    /// Endpoints are counted per segment, so a vertex shared by two group
    /// members weighs twice - matching how reference lines are derived.
    pub fn average_y(&self, direction: FacadeDirection) -> Option<f64> {
        let segments = self.get(direction);
        if segments.is_empty() {
            return None;
        }
        let sum: f64 = segments.iter().map(|s| s.p1[1] + s.p2[1]).sum();
        Some(sum / (2 * segments.len()) as f64)
    }

    /// Leftmost/rightmost x over all segment endpoints of one direction
    pub fn x_extent(&self, direction: FacadeDirection) -> Option<(f64, f64)> {
        let segments = self.get(direction);
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for s in segments {
            min_x = min_x.min(s.p1[0]).min(s.p2[0]);
            max_x = max_x.max(s.p1[0]).max(s.p2[0]);
        }
        if segments.is_empty() {
            None
        } else {
            Some((min_x, max_x))
        }
    }
}

/// Classify every perimeter edge into one of the four facade groups
///
/// Horizontal-class segments go North when their midpoint sits on or above
/// the bounding-box center line, South otherwise; vertical-class segments go
/// East when on or right of it, West otherwise. The comparisons are
/// inclusive on the North/East side so boundary edges land deterministically.
///
/// Fewer than 3 vertices yields all-empty groups.
pub fn classify_facades(polygon: &Polygon) -> FacadeGroups {
    let mut groups = FacadeGroups::default();
    if !polygon.has_area_support() {
        return groups;
    }
    let center = match polygon.bounding_box_center() {
        Some(c) => c,
        None => return groups,
    };

    for (p1, p2, index) in polygon.edges() {
        let segment = Segment::new([p1.x, p1.y], [p2.x, p2.y], index);
        if segment.is_horizontal() {
            if segment.midpoint[1] <= center.y {
                groups.north.push(segment);
            } else {
                groups.south.push(segment);
            }
        } else if segment.midpoint[0] >= center.x {
            groups.east.push(segment);
        } else {
            groups.west.push(segment);
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use greenhouse_model::FacadeDirection;

    fn rectangle() -> Polygon {
        Polygon::from_xy(&[(0.0, 0.0), (500.0, 0.0), (500.0, 300.0), (0.0, 300.0)])
    }

    #[test]
    fn test_rectangle_sides_classified() {
        let groups = classify_facades(&rectangle());
        assert_eq!(groups.north.len(), 1);
        assert_eq!(groups.south.len(), 1);
        assert_eq!(groups.east.len(), 1);
        assert_eq!(groups.west.len(), 1);
        assert_eq!(groups.north[0].index, 0);
        assert_eq!(groups.south[0].index, 2);
    }

    #[test]
    fn test_partition_is_total() {
        // L-shaped perimeter with six edges: each must land in exactly one
        // group
        let poly = Polygon::from_xy(&[
            (0.0, 0.0),
            (400.0, 0.0),
            (400.0, 150.0),
            (200.0, 150.0),
            (200.0, 300.0),
            (0.0, 300.0),
        ]);
        let groups = classify_facades(&poly);
        assert_eq!(groups.segment_count(), poly.edges().len());
    }

    #[test]
    fn test_diagonal_edge_at_45_degrees_is_horizontal() {
        // Exactly 45 degrees classifies as horizontal per the inclusive
        // comparison
        let s = Segment::new([0.0, 0.0], [10.0, 10.0], 0);
        assert_relative_eq!(s.angle_deg, 45.0);
        assert!(s.is_horizontal());
    }

    #[test]
    fn test_steep_edge_is_vertical() {
        let s = Segment::new([0.0, 0.0], [1.0, 10.0], 0);
        assert!(!s.is_horizontal());
    }

    #[test]
    fn test_too_few_vertices_yields_empty_groups() {
        let poly = Polygon::from_xy(&[(0.0, 0.0), (10.0, 0.0)]);
        let groups = classify_facades(&poly);
        assert_eq!(groups.segment_count(), 0);
    }

    #[test]
    fn test_aggregates() {
        let groups = classify_facades(&rectangle());
        assert_relative_eq!(groups.total_length(FacadeDirection::North), 500.0);
        assert_relative_eq!(groups.average_y(FacadeDirection::North).unwrap(), 0.0);
        assert_relative_eq!(groups.average_y(FacadeDirection::South).unwrap(), 300.0);
        let (min_x, max_x) = groups.x_extent(FacadeDirection::North).unwrap();
        assert_relative_eq!(min_x, 0.0);
        assert_relative_eq!(max_x, 500.0);
    }

    #[test]
    fn test_regularity_tolerance() {
        let level = Segment::new([0.0, 0.0], [100.0, 0.0], 0);
        assert!(level.is_regular(10.0));
        // Just under 10 degrees of slope stays regular
        let slight = Segment::new([0.0, 0.0], [100.0, 17.0], 0);
        assert!(slight.is_regular(10.0));
        // Beyond the tolerance flips it
        let steep = Segment::new([0.0, 0.0], [100.0, 20.0], 0);
        assert!(!steep.is_regular(10.0));
        // Reversed direction (around 180 degrees) still counts
        let reversed = Segment::new([100.0, 0.0], [0.0, 0.0], 0);
        assert!(reversed.is_regular(10.0));
    }
}
