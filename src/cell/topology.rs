// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Tree-walking queries: path lengths, totals and the continuity check

use crate::cell::morphology::{Cell, CellError};
use crate::cell::segment::SegmentLocation;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Absolute tolerance for the parent/child continuity invariant
pub const CONTINUITY_TOLERANCE: f64 = 1e-6;

/// A parent/child attachment whose geometry does not line up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discontinuity {
    pub segment: u32,
    /// Point on the parent at `fraction_along_parent`
    pub expected: Point3<f64>,
    /// The segment's actual start point
    pub actual: Point3<f64>,
    pub distance: f64,
}

impl fmt::Display for Discontinuity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "segment {} starts at ({:.4}, {:.4}, {:.4}) but its parent attachment point is ({:.4}, {:.4}, {:.4}), {:.2e} away",
            self.segment,
            self.actual.x,
            self.actual.y,
            self.actual.z,
            self.expected.x,
            self.expected.y,
            self.expected.z,
            self.distance
        )
    }
}

/// Outcome of the morphological validity walk.
///
/// A cell can be loaded but invalid; the walk reports every problem it finds
/// rather than failing on the first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidityReport {
    pub discontinuities: Vec<Discontinuity>,
    pub problems: Vec<String>,
}

impl ValidityReport {
    pub fn is_valid(&self) -> bool {
        self.discontinuities.is_empty() && self.problems.is_empty()
    }

    pub fn summary(&self) -> String {
        if self.is_valid() {
            return "cell is valid".to_string();
        }
        let mut lines: Vec<String> = self
            .discontinuities
            .iter()
            .map(|d| d.to_string())
            .collect();
        lines.extend(self.problems.iter().cloned());
        lines.join("; ")
    }
}

impl Cell {
    /// Path length from the root to a location: the partial length of the
    /// containing segment plus, for each ancestor, the parent length scaled
    /// by the child's attachment fraction.
    pub fn length_from_root(&self, location: SegmentLocation) -> Result<f64, CellError> {
        if !(0.0..=1.0).contains(&location.fraction_along) {
            return Err(CellError::FractionOutOfRange(location.fraction_along));
        }
        let mut seg = self.segment_checked(location.segment)?;
        let mut total = seg.length() * location.fraction_along;

        while let Some(parent_id) = seg.parent {
            let parent = self.segment_checked(parent_id)?;
            total += parent.length() * seg.fraction_along_parent;
            seg = parent;
        }

        trace!(segment = location.segment, length = total, "length from root");
        Ok(total)
    }

    /// Shortest path length from the root to the proximal end of any segment
    /// in the group; 0.0 when the group is empty
    pub fn min_length_from_root(&self, group: &str) -> f64 {
        self.segments_in_group(group)
            .iter()
            .filter_map(|s| self.length_from_root(SegmentLocation::new(s.id, 0.0)).ok())
            .fold(None, |min: Option<f64>, l| {
                Some(min.map_or(l, |m| m.min(l)))
            })
            .unwrap_or(0.0)
    }

    /// Longest path length from the root to the distal end of any segment in
    /// the group; 0.0 when the group is empty
    pub fn max_length_from_root(&self, group: &str) -> f64 {
        self.segments_in_group(group)
            .iter()
            .filter_map(|s| self.length_from_root(SegmentLocation::new(s.id, 1.0)).ok())
            .fold(0.0, f64::max)
    }

    /// Total length of every segment on the cell
    pub fn total_length(&self) -> f64 {
        self.segments().iter().map(|s| s.length()).sum()
    }

    /// Total membrane surface area of every segment on the cell
    pub fn total_surface_area(&self) -> f64 {
        self.segments().iter().map(|s| s.curved_surface_area()).sum()
    }

    /// Walk the tree verifying the continuity invariant: every non-root
    /// segment's start point must coincide (within [`CONTINUITY_TOLERANCE`])
    /// with the point on its parent at `fraction_along_parent`. Radii and
    /// attachment fractions are checked alongside.
    pub fn validity(&self) -> ValidityReport {
        let mut report = ValidityReport::default();

        for seg in self.segments() {
            if seg.start_radius < 0.0 || seg.end_radius < 0.0 {
                report
                    .problems
                    .push(format!("segment {} has a negative radius", seg.id));
            }
            if !(0.0..=1.0).contains(&seg.fraction_along_parent) {
                report.problems.push(format!(
                    "segment {} attaches at fraction {} outside [0, 1]",
                    seg.id, seg.fraction_along_parent
                ));
                continue;
            }
            let Some(parent_id) = seg.parent else {
                continue;
            };
            let Some(parent) = self.segment(parent_id) else {
                report.problems.push(format!(
                    "segment {} names parent {} which is not on the cell",
                    seg.id, parent_id
                ));
                continue;
            };

            let expected = parent.point_at(seg.fraction_along_parent);
            let distance = (expected - seg.start).norm();
            trace!(segment = seg.id, distance, "continuity check");

            if distance > CONTINUITY_TOLERANCE {
                report.discontinuities.push(Discontinuity {
                    segment: seg.id,
                    expected,
                    actual: seg.start,
                    distance,
                });
            }
        }

        report
    }
}
