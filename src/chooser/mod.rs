// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Strategies for picking locations on a cell, used when placing synaptic
//! connections and point processes

pub mod distributed;
pub mod individual;

use crate::cell::{Cell, SegmentLocation};
use rand::RngCore;
use thiserror::Error;

pub use distributed::GroupDistributedSegments;
pub use individual::IndividualSegments;

#[derive(Debug, Error)]
pub enum ChooserError {
    #[error("chooser not initialised against a cell")]
    NotInitialised,

    #[error("all locations have been chosen")]
    AllChosen,

    #[error("no segment with id {0} on the cell")]
    NoSuchSegment(u32),

    #[error("group {0} contains no segments")]
    EmptyGroup(String),
}

/// A stateful source of segment locations on one cell.
///
/// Implementations are initialised against a cell, then yield locations one
/// at a time until exhausted, at which point they return
/// [`ChooserError::AllChosen`]. All randomness comes from the generator the
/// caller passes in, so a seeded run is reproducible.
pub trait SegmentLocationChooser {
    /// Prepare against a cell. Must be called before [`next_seg_loc`]
    /// (re-initialising resets the sequence).
    ///
    /// [`next_seg_loc`]: SegmentLocationChooser::next_seg_loc
    fn initialise(&mut self, cell: &Cell, rng: &mut dyn RngCore) -> Result<(), ChooserError>;

    /// The next chosen location
    fn next_seg_loc(&mut self) -> Result<SegmentLocation, ChooserError>;

    /// Human-readable summary of the strategy
    fn description(&self) -> String;
}

/// Closed set of chooser strategies, for storage in serialisable configs
#[derive(Debug, Clone)]
pub enum SegmentChooser {
    Individual(IndividualSegments),
    GroupDistributed(GroupDistributedSegments),
}

impl SegmentLocationChooser for SegmentChooser {
    fn initialise(&mut self, cell: &Cell, rng: &mut dyn RngCore) -> Result<(), ChooserError> {
        match self {
            SegmentChooser::Individual(c) => c.initialise(cell, rng),
            SegmentChooser::GroupDistributed(c) => c.initialise(cell, rng),
        }
    }

    fn next_seg_loc(&mut self) -> Result<SegmentLocation, ChooserError> {
        match self {
            SegmentChooser::Individual(c) => c.next_seg_loc(),
            SegmentChooser::GroupDistributed(c) => c.next_seg_loc(),
        }
    }

    fn description(&self) -> String {
        match self {
            SegmentChooser::Individual(c) => c.description(),
            SegmentChooser::GroupDistributed(c) => c.description(),
        }
    }
}
