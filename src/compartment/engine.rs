// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Recompartmentalisation strategies
//!
//! Simulators with single-cylinder compartments cannot represent an
//! arbitrarily detailed morphology directly. A strategy here takes a cell and
//! produces a simulator-ready equivalent built from uniform cylinders,
//! together with a [`SegmentLocMapper`] translating locations between the
//! two. The input cell is never modified.

use crate::cell::frustum::{chain_length, fractional_surface_area, Frustum};
use crate::cell::{Cell, CellError, Section, Segment, SegmentLocation};
use crate::compartment::mapper::{MapperError, SegmentLocMapper};
use crate::compartment::range::SegmentRange;
use nalgebra::Vector3;
use std::f64::consts::PI;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CompartmentalisationError {
    #[error("cell {name} is not a valid morphology: {details}")]
    InvalidMorphology { name: String, details: String },

    #[error(transparent)]
    Cell(#[from] CellError),

    #[error(transparent)]
    Mapper(#[from] MapperError),
}

/// A generated cell plus the mapper back from the source cell's locations
#[derive(Debug, Clone)]
pub struct Compartmentalisation {
    cell: Cell,
    mapper: SegmentLocMapper,
}

impl Compartmentalisation {
    pub fn cell(&self) -> &Cell {
        &self.cell
    }

    pub fn mapper(&self) -> &SegmentLocMapper {
        &self.mapper
    }

    /// Location on the generated cell equivalent to one on the source cell
    pub fn map(&self, location: SegmentLocation) -> Result<SegmentLocation, MapperError> {
        self.mapper.map_segment_location(location)
    }
}

/// A strategy for turning a morphology into simulator-ready compartments
pub trait MorphCompartmentalisation {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Generate the compartmentalised cell. The source cell is validated
    /// first and left untouched.
    fn generate(&self, cell: &Cell) -> Result<Compartmentalisation, CompartmentalisationError>;
}

fn validate(cell: &Cell) -> Result<(), CompartmentalisationError> {
    let report = cell.validity();
    if report.is_valid() {
        Ok(())
    } else {
        Err(CompartmentalisationError::InvalidMorphology {
            name: cell.name().to_string(),
            details: report.summary(),
        })
    }
}

/// Keeps the morphology exactly as authored; the mapper is the identity
#[derive(Debug, Clone, Copy, Default)]
pub struct OriginalCompartmentalisation;

impl MorphCompartmentalisation for OriginalCompartmentalisation {
    fn name(&self) -> &'static str {
        "Original"
    }

    fn description(&self) -> &'static str {
        "Morphology passed through unaltered"
    }

    fn generate(&self, cell: &Cell) -> Result<Compartmentalisation, CompartmentalisationError> {
        validate(cell)?;
        Ok(Compartmentalisation {
            cell: cell.clone(),
            mapper: SegmentLocMapper::for_cell(cell),
        })
    }
}

/// Collapses each section into `number_internal_divisions` uniform cylinders.
///
/// Every generated cylinder in a section has the same length, the chain is
/// straightened along the section's chord (grown so total length is kept),
/// and each cylinder's radius is chosen so its lateral surface area equals
/// the area of the stretch of original membrane it replaces. Total length and
/// total membrane area of every section are therefore preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivisionsCompartmentalisation;

impl MorphCompartmentalisation for DivisionsCompartmentalisation {
    fn name(&self) -> &'static str {
        "Divisions"
    }

    fn description(&self) -> &'static str {
        "Each section becomes numberInternalDivisions equal cylinders of equivalent membrane area"
    }

    fn generate(&self, cell: &Cell) -> Result<Compartmentalisation, CompartmentalisationError> {
        validate(cell)?;

        let mut generated = Cell::new(cell.name());
        let mut mapper = SegmentLocMapper::for_cell(cell);

        // Section indices are preserved between the cells
        for section in cell.sections() {
            generated.add_section(section.clone());
        }

        // Ids for generated cylinders start above every source id, so
        // sections passed through unchanged can keep theirs
        let mut next_id = cell.next_segment_id();

        for section_index in section_order(cell) {
            let section = &cell.sections()[section_index];
            let segments = cell.segments_in_section(section_index);
            let first = segments[0];

            // Anchor the section where its attachment point landed on the
            // cell generated so far
            let attachment = match first.parent {
                None => None,
                Some(parent) => {
                    let mapped = mapper.map_segment_location(SegmentLocation::new(
                        parent,
                        first.fraction_along_parent,
                    ))?;
                    Some(mapped)
                }
            };
            let new_start = match attachment {
                Some(loc) => generated
                    .segment(loc.segment)
                    .ok_or(CellError::NoSuchSegment(loc.segment))?
                    .point_at(loc.fraction_along),
                None => first.start,
            };

            if passes_through(section, &segments) {
                let delta = new_start - first.start;
                for (i, old) in segments.iter().enumerate() {
                    let mut seg = (*old).clone();
                    seg.start += delta;
                    seg.end += delta;
                    if i == 0 {
                        if let Some(loc) = attachment {
                            seg.parent = Some(loc.segment);
                            seg.fraction_along_parent = loc.fraction_along;
                        }
                    }
                    generated.add_segment(seg)?;
                }
                continue;
            }

            let n = section.number_internal_divisions.max(1) as usize;
            let frusta: Vec<Frustum> = segments.iter().map(|s| s.frustum()).collect();
            let total = chain_length(&frusta);
            let piece = total / n as f64;

            debug!(
                section = %section.name,
                segments = segments.len(),
                divisions = n,
                total_length = total,
                "collapsing section"
            );

            // Straightened axis: the section chord, rescaled to keep length
            let chord = segments.last().expect("non-empty section").end - first.start;
            let direction = if chord.norm() > 0.0 {
                chord.normalize()
            } else {
                Vector3::y()
            };

            let mut ids: Vec<u32> = Vec::with_capacity(n);
            let mut start = new_start;
            let mut area_so_far = 0.0;
            for division in 0..n {
                let area_to_here =
                    fractional_surface_area(&frusta, (division + 1) as f64 / n as f64);
                let radius = (area_to_here - area_so_far) / (2.0 * PI * piece);
                area_so_far = area_to_here;

                let end = start + direction * piece;
                let (parent, fraction) = if division == 0 {
                    match attachment {
                        Some(loc) => (Some(loc.segment), loc.fraction_along),
                        None => (None, first.fraction_along_parent),
                    }
                } else {
                    (Some(ids[division - 1]), 1.0)
                };

                let id = next_id;
                next_id += 1;
                generated.add_segment(Segment::cylindrical(
                    id,
                    format!("{}_div_{}", section.name, division),
                    section_index,
                    start,
                    end,
                    radius,
                    radius,
                    parent,
                    fraction,
                ))?;
                ids.push(id);
                start = end;
            }

            // Record where each original segment's arc now lives
            let mut arc = 0.0;
            for old in &segments {
                let length = old.length();
                let targets = overlapping_ranges(&ids, piece, arc, arc + length);
                mapper.add_mapping(SegmentRange::whole(old.id, length), targets);
                arc += length;
            }
        }

        Ok(Compartmentalisation {
            cell: generated,
            mapper,
        })
    }
}

/// Sections whose geometry a division pass would reproduce exactly: purely
/// spherical sections, and single uniform cylinders at one division
fn passes_through(section: &Section, segments: &[&Segment]) -> bool {
    if segments.iter().all(|s| s.spherical) {
        return true;
    }
    section.number_internal_divisions <= 1
        && segments.len() == 1
        && segments[0].start_radius == segments[0].end_radius
}

/// Section indices in order of first segment appearance, which puts parent
/// sections before their children
fn section_order(cell: &Cell) -> Vec<usize> {
    let mut order = Vec::new();
    for segment in cell.segments() {
        if !order.contains(&segment.section) {
            order.push(segment.section);
        }
    }
    order
}

/// Ranges of the generated cylinders covered by the arc [arc_start, arc_end]
/// along the collapsed section
fn overlapping_ranges(
    ids: &[u32],
    piece: f64,
    arc_start: f64,
    arc_end: f64,
) -> Vec<SegmentRange> {
    let mut out = Vec::new();
    for (division, &id) in ids.iter().enumerate() {
        let lo = division as f64 * piece;
        let hi = lo + piece;
        let overlap_start = arc_start.max(lo);
        let overlap_end = arc_end.min(hi);
        if overlap_end >= overlap_start && (overlap_end > overlap_start || arc_end == arc_start) {
            out.push(SegmentRange::new(
                id,
                piece,
                (overlap_start - lo) / piece,
                (overlap_end - lo) / piece,
            ));
        }
    }
    out
}

/// Closed set of strategies for configuration and dispatch
#[derive(Debug, Clone, Copy)]
pub enum Recompartmentalisation {
    Original(OriginalCompartmentalisation),
    Divisions(DivisionsCompartmentalisation),
}

impl Default for Recompartmentalisation {
    fn default() -> Self {
        Recompartmentalisation::Divisions(DivisionsCompartmentalisation)
    }
}

impl MorphCompartmentalisation for Recompartmentalisation {
    fn name(&self) -> &'static str {
        match self {
            Recompartmentalisation::Original(s) => s.name(),
            Recompartmentalisation::Divisions(s) => s.name(),
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Recompartmentalisation::Original(s) => s.description(),
            Recompartmentalisation::Divisions(s) => s.description(),
        }
    }

    fn generate(&self, cell: &Cell) -> Result<Compartmentalisation, CompartmentalisationError> {
        match self {
            Recompartmentalisation::Original(s) => s.generate(cell),
            Recompartmentalisation::Divisions(s) => s.generate(cell),
        }
    }
}
