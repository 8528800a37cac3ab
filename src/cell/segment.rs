// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Segment, section and segment-location primitives

use crate::cell::frustum::Frustum;
use crate::utils::math::{lerp, lerp_point};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Group every soma section belongs to
pub const SOMA_GROUP: &str = "soma_group";
/// Group every dendritic section belongs to
pub const DENDRITE_GROUP: &str = "dendrite_group";
/// Group every axonal section belongs to
pub const AXON_GROUP: &str = "axon_group";
/// Group containing every section
pub const ALL_GROUP: &str = "all";

/// A named run of segments sharing biophysical properties.
///
/// The section is the unit of discretization control: its
/// `number_internal_divisions` tells the compartmentalisation engine how many
/// compartments its segments collapse into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub number_internal_divisions: u32,
    pub comment: Option<String>,
    pub groups: Vec<String>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number_internal_divisions: 1,
            comment: None,
            groups: Vec::new(),
        }
    }

    pub fn with_groups(name: impl Into<String>, groups: &[&str]) -> Self {
        let mut section = Self::new(name);
        section.groups = groups.iter().map(|g| g.to_string()).collect();
        section
    }

    pub fn with_divisions(mut self, divisions: u32) -> Self {
        self.number_internal_divisions = divisions.max(1);
        self
    }

    pub fn in_group(&self, group: &str) -> bool {
        self.groups.iter().any(|g| g == group)
    }
}

/// A cylindrical or spherical primitive of a morphology tree.
///
/// Segments reference their parent by id, never by pointer; the owning
/// [`Cell`](crate::cell::Cell) resolves ids through its segment table. A
/// spherical segment has coincident start and end points and contributes zero
/// length but a surface area of `4*pi*r^2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub name: String,
    /// Index of the owning section in the cell's section table
    pub section: usize,
    pub start: Point3<f64>,
    pub end: Point3<f64>,
    pub start_radius: f64,
    pub end_radius: f64,
    pub spherical: bool,
    /// Id of the parent segment; `None` only for the root
    pub parent: Option<u32>,
    /// Point on the parent where this segment attaches, in [0, 1]
    pub fraction_along_parent: f64,
}

impl Segment {
    /// A cylindrical (or tapering frustum) segment
    #[allow(clippy::too_many_arguments)]
    pub fn cylindrical(
        id: u32,
        name: impl Into<String>,
        section: usize,
        start: Point3<f64>,
        end: Point3<f64>,
        start_radius: f64,
        end_radius: f64,
        parent: Option<u32>,
        fraction_along_parent: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            section,
            start,
            end,
            start_radius,
            end_radius,
            spherical: false,
            parent,
            fraction_along_parent,
        }
    }

    /// A spherical segment (typically the soma root)
    pub fn spherical(
        id: u32,
        name: impl Into<String>,
        section: usize,
        centre: Point3<f64>,
        radius: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            section,
            start: centre,
            end: centre,
            start_radius: radius,
            end_radius: radius,
            spherical: true,
            parent: None,
            fraction_along_parent: 1.0,
        }
    }

    /// Segment length: Euclidean start-to-end distance, zero for spheres
    pub fn length(&self) -> f64 {
        if self.spherical {
            return 0.0;
        }
        (self.end - self.start).norm()
    }

    /// Radius at a fraction along the segment, linearly interpolated
    pub fn radius_at(&self, fraction: f64) -> f64 {
        if self.spherical {
            return self.start_radius;
        }
        lerp(self.start_radius, self.end_radius, fraction)
    }

    /// 3D point at a fraction along the segment
    pub fn point_at(&self, fraction: f64) -> Point3<f64> {
        lerp_point(&self.start, &self.end, fraction)
    }

    /// Membrane surface area: lateral frustum area, or the full sphere
    pub fn curved_surface_area(&self) -> f64 {
        if self.spherical {
            return 4.0 * PI * self.start_radius * self.start_radius;
        }
        self.frustum().curved_surface_area()
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::new(self.start_radius, self.end_radius, self.length())
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// An addressable point on a cell: a segment id and a fraction along it.
///
/// This is the single location type used for stimulation targets, recording
/// points and compartmentalisation mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentLocation {
    pub segment: u32,
    pub fraction_along: f64,
}

impl SegmentLocation {
    pub fn new(segment: u32, fraction_along: f64) -> Self {
        Self {
            segment,
            fraction_along,
        }
    }
}

impl fmt::Display for SegmentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(seg: {}, fract: {})", self.segment, self.fraction_along)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dend() -> Segment {
        Segment::cylindrical(
            1,
            "dend",
            0,
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
            2.0,
            4.0,
            Some(0),
            1.0,
        )
    }

    #[test]
    fn test_length_and_radius_interpolation() {
        let seg = dend();
        assert_relative_eq!(seg.length(), 10.0);
        assert_relative_eq!(seg.radius_at(0.0), 2.0);
        assert_relative_eq!(seg.radius_at(0.5), 3.0);
        assert_relative_eq!(seg.radius_at(1.0), 4.0);
    }

    #[test]
    fn test_spherical_segment() {
        let soma = Segment::spherical(0, "soma", 0, Point3::origin(), 8.0);
        assert_eq!(soma.length(), 0.0);
        assert_relative_eq!(soma.radius_at(0.3), 8.0);
        assert_relative_eq!(soma.curved_surface_area(), 4.0 * PI * 64.0);
    }

    #[test]
    fn test_point_at() {
        let seg = dend();
        assert_eq!(seg.point_at(0.5), Point3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_location_equality() {
        assert_eq!(SegmentLocation::new(2, 0.5), SegmentLocation::new(2, 0.5));
        assert_ne!(SegmentLocation::new(2, 0.5), SegmentLocation::new(2, 0.25));
        assert_ne!(SegmentLocation::new(2, 0.5), SegmentLocation::new(3, 0.5));
    }
}
