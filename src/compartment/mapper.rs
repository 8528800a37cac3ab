// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Location mapping between a cell and its recompartmentalised form
//!
//! When segments are merged or split, any stored [`SegmentLocation`] on the
//! original cell must be translated to the equivalent point on the generated
//! one. The mapper records, per original segment, the ranges of generated
//! segments covering it, and maps by arc length so path distances from the
//! root are preserved exactly.

use crate::cell::{Cell, SegmentLocation};
use crate::compartment::range::SegmentRange;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::trace;

const FRACTION_SNAP: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum MapperError {
    #[error("no segment with id {0} on the source cell")]
    UnknownSegment(u32),

    #[error("fraction along ({0}) outside [0, 1]")]
    FractionOutOfRange(f64),
}

/// One original range and the generated ranges that now cover it, ordered
/// proximal to distal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeMapping {
    pub from: SegmentRange,
    pub to: Vec<SegmentRange>,
}

/// Maps locations on a source cell onto its recompartmentalised counterpart.
///
/// Segments without an explicit mapping pass through unchanged, so a mapper
/// with no entries is the identity over the source cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentLocMapper {
    source_ids: BTreeSet<u32>,
    mappings: Vec<RangeMapping>,
}

impl SegmentLocMapper {
    /// An identity mapper over the cell's current segments
    pub fn for_cell(cell: &Cell) -> Self {
        Self {
            source_ids: cell.segments().iter().map(|s| s.id).collect(),
            mappings: Vec::new(),
        }
    }

    pub fn add_mapping(&mut self, from: SegmentRange, to: Vec<SegmentRange>) {
        self.mappings.push(RangeMapping { from, to });
    }

    pub fn mappings(&self) -> &[RangeMapping] {
        &self.mappings
    }

    /// Original segment ids with an explicit mapping
    pub fn ids_mapped_from(&self) -> BTreeSet<u32> {
        self.mappings.iter().map(|m| m.from.segment).collect()
    }

    /// Generated segment ids appearing as mapping targets
    pub fn ids_mapped_to(&self) -> BTreeSet<u32> {
        self.mappings
            .iter()
            .flat_map(|m| m.to.iter().map(|r| r.segment))
            .collect()
    }

    /// Mappings recorded for one original segment
    pub fn mappings_for(&self, segment: u32) -> Vec<&RangeMapping> {
        self.mappings
            .iter()
            .filter(|m| m.from.segment == segment)
            .collect()
    }

    /// Original segment whose mapping covers the given generated segment
    pub fn from_segment_id(&self, to_segment: u32) -> Option<u32> {
        self.mappings
            .iter()
            .find(|m| m.to.iter().any(|r| r.segment == to_segment))
            .map(|m| m.from.segment)
    }

    /// Translate a location on the source cell to the generated cell.
    ///
    /// The mapped point sits at the same arc length along the covering
    /// ranges as the original point sits within its range.
    pub fn map_segment_location(
        &self,
        location: SegmentLocation,
    ) -> Result<SegmentLocation, MapperError> {
        if !(0.0..=1.0).contains(&location.fraction_along) {
            return Err(MapperError::FractionOutOfRange(location.fraction_along));
        }
        if !self.source_ids.contains(&location.segment) {
            return Err(MapperError::UnknownSegment(location.segment));
        }

        let Some(mapping) = self
            .mappings
            .iter()
            .find(|m| m.from.segment == location.segment && m.from.contains(location.fraction_along))
        else {
            return Ok(location);
        };
        let Some(last) = mapping.to.last() else {
            return Ok(location);
        };

        let span = mapping.from.end_fraction - mapping.from.start_fraction;
        let total_to: f64 = mapping.to.iter().map(|r| r.range_length()).sum();

        // Position within the source range, rescaled to the target arc
        let along = if span > 0.0 {
            (location.fraction_along - mapping.from.start_fraction) / span
        } else {
            0.0
        };
        let mut remaining = total_to * along;

        let mut result = None;
        for range in &mapping.to {
            let length = range.range_length();
            if remaining <= length || range == last {
                let fraction = if range.total_length > 0.0 {
                    range.start_fraction + remaining.min(length) / range.total_length
                } else {
                    range.start_fraction
                };
                result = Some(SegmentLocation::new(range.segment, snap(fraction)));
                break;
            }
            remaining -= length;
        }

        let mapped = result.unwrap_or(location);
        trace!(%location, %mapped, "mapped location");
        Ok(mapped)
    }
}

fn snap(fraction: f64) -> f64 {
    if fraction.abs() < FRACTION_SNAP {
        0.0
    } else if (fraction - 1.0).abs() < FRACTION_SNAP {
        1.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}
