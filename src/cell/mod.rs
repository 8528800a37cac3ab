// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Neuron morphology data model: segments, sections, cells and the queries
//! and parameterisations defined over them

pub mod frustum;
pub mod morphology;
pub mod params;
pub mod samples;
pub mod segment;
pub mod topology;

pub use frustum::Frustum;
pub use morphology::{Cell, CellError};
pub use params::{
    DistalPref, Metric, ParameterError, ParameterisedGroup, ProximalPref, VariableMechanism,
};
pub use segment::{
    Section, Segment, SegmentLocation, ALL_GROUP, AXON_GROUP, DENDRITE_GROUP, SOMA_GROUP,
};
pub use topology::{Discontinuity, ValidityReport, CONTINUITY_TOLERANCE};
