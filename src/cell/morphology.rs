// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! The cell: a rooted tree of sections and segments

use crate::cell::params::{ParameterisedGroup, VariableMechanism};
use crate::cell::segment::{Section, Segment};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Structural errors raised by cell construction and location resolution
#[derive(Debug, Error)]
pub enum CellError {
    #[error("no segment with id {0} on the cell")]
    NoSuchSegment(u32),

    #[error("no section with index {0} on the cell")]
    NoSuchSection(usize),

    #[error("segment id {0} is already present")]
    DuplicateSegmentId(u32),

    #[error("fraction along ({0}) outside [0, 1]")]
    FractionOutOfRange(f64),

    #[error("cell already has a root segment; segment {0} needs a parent")]
    SecondRoot(u32),

    #[error("segment {segment} is not part of group {group}")]
    NotInGroup { segment: u32, group: String },

    #[error("no parameterised group named {0} on the cell")]
    NoSuchParameterisedGroup(String),
}

/// A single neuron morphology: an ordered arena of segments forming a rooted
/// tree, the sections they belong to, and the parameterisations attached to
/// its groups.
///
/// Topology is fixed at construction time: a segment can only be added once
/// its parent exists, so cycles cannot be formed. The compartmentalisation
/// engine never mutates a cell; it builds a new one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    name: String,
    sections: Vec<Section>,
    segments: Vec<Segment>,
    index: HashMap<u32, usize>,
    parameterised_groups: Vec<ParameterisedGroup>,
    variable_mechanisms: Vec<VariableMechanism>,
}

impl Cell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: Vec::new(),
            segments: Vec::new(),
            index: HashMap::new(),
            parameterised_groups: Vec::new(),
            variable_mechanisms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a section, returning its index for use in segment construction
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Add a segment. The parent (if any) must already be present, duplicate
    /// ids are rejected, and only the first segment may be parentless.
    pub fn add_segment(&mut self, segment: Segment) -> Result<(), CellError> {
        if self.index.contains_key(&segment.id) {
            return Err(CellError::DuplicateSegmentId(segment.id));
        }
        if segment.section >= self.sections.len() {
            return Err(CellError::NoSuchSection(segment.section));
        }
        if !(0.0..=1.0).contains(&segment.fraction_along_parent) {
            return Err(CellError::FractionOutOfRange(segment.fraction_along_parent));
        }
        match segment.parent {
            None if !self.segments.is_empty() => return Err(CellError::SecondRoot(segment.id)),
            Some(parent) if !self.index.contains_key(&parent) => {
                return Err(CellError::NoSuchSegment(parent));
            }
            _ => {}
        }

        self.index.insert(segment.id, self.segments.len());
        self.segments.push(segment);
        Ok(())
    }

    /// Add the root segment; shorthand for [`add_segment`](Cell::add_segment)
    /// with no parent
    pub fn add_root_segment(&mut self, mut segment: Segment) -> Result<(), CellError> {
        segment.parent = None;
        self.add_segment(segment)
    }

    /// All segments, in insertion order (parents always before children)
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    pub fn segment(&self, id: u32) -> Option<&Segment> {
        self.index.get(&id).map(|&i| &self.segments[i])
    }

    pub(crate) fn segment_checked(&self, id: u32) -> Result<&Segment, CellError> {
        self.segment(id).ok_or(CellError::NoSuchSegment(id))
    }

    pub fn root(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// Smallest id strictly greater than every id in use
    pub fn next_segment_id(&self) -> u32 {
        self.segments.iter().map(|s| s.id + 1).max().unwrap_or(0)
    }

    /// Segments whose section carries the given group tag, in insertion order
    pub fn segments_in_group(&self, group: &str) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| self.sections[s.section].in_group(group))
            .collect()
    }

    pub fn segments_in_section(&self, section: usize) -> Vec<&Segment> {
        self.segments
            .iter()
            .filter(|s| s.section == section)
            .collect()
    }

    /// Every group name used by any section
    pub fn group_names(&self) -> BTreeSet<&str> {
        self.sections
            .iter()
            .flat_map(|sec| sec.groups.iter().map(|g| g.as_str()))
            .collect()
    }

    pub fn add_parameterised_group(&mut self, group: ParameterisedGroup) {
        self.parameterised_groups.push(group);
    }

    pub fn parameterised_groups(&self) -> &[ParameterisedGroup] {
        &self.parameterised_groups
    }

    pub fn parameterised_group(&self, name: &str) -> Option<&ParameterisedGroup> {
        self.parameterised_groups.iter().find(|p| p.name == name)
    }

    pub fn add_variable_mechanism(&mut self, mechanism: VariableMechanism) {
        self.variable_mechanisms.push(mechanism);
    }

    pub fn variable_mechanisms(&self) -> &[VariableMechanism] {
        &self.variable_mechanisms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::segment::{DENDRITE_GROUP, SOMA_GROUP};
    use nalgebra::Point3;

    fn two_segment_cell() -> Cell {
        let mut cell = Cell::new("TestCell");
        let soma = cell.add_section(Section::with_groups("Soma", &[SOMA_GROUP, "all"]));
        let dend = cell.add_section(Section::with_groups("Dend", &[DENDRITE_GROUP, "all"]));

        cell.add_segment(Segment::spherical(0, "soma", soma, Point3::origin(), 8.0))
            .unwrap();
        cell.add_segment(Segment::cylindrical(
            1,
            "dend",
            dend,
            Point3::origin(),
            Point3::new(0.0, 20.0, 0.0),
            2.0,
            2.0,
            Some(0),
            0.5,
        ))
        .unwrap();
        cell
    }

    #[test]
    fn test_insertion_order_preserved() {
        let cell = two_segment_cell();
        let ids: Vec<u32> = cell.segments().iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn test_group_query() {
        let cell = two_segment_cell();
        assert_eq!(cell.segments_in_group(SOMA_GROUP).len(), 1);
        assert_eq!(cell.segments_in_group(DENDRITE_GROUP).len(), 1);
        assert_eq!(cell.segments_in_group("all").len(), 2);
        assert!(cell.segments_in_group("no_such_group").is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut cell = two_segment_cell();
        let seg = Segment::cylindrical(
            1,
            "dup",
            0,
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            1.0,
            1.0,
            Some(0),
            1.0,
        );
        assert!(matches!(
            cell.add_segment(seg),
            Err(CellError::DuplicateSegmentId(1))
        ));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut cell = two_segment_cell();
        let seg = Segment::cylindrical(
            9,
            "orphan",
            0,
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            1.0,
            1.0,
            Some(42),
            1.0,
        );
        assert!(matches!(
            cell.add_segment(seg),
            Err(CellError::NoSuchSegment(42))
        ));
    }

    #[test]
    fn test_second_root_rejected() {
        let mut cell = two_segment_cell();
        let seg = Segment::spherical(7, "soma2", 0, Point3::origin(), 4.0);
        assert!(matches!(
            cell.add_segment(seg),
            Err(CellError::SecondRoot(7))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let cell = two_segment_cell();
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back.segments().len(), cell.segments().len());
        assert_eq!(back.segment(1).unwrap().end, cell.segment(1).unwrap().end);
    }
}
