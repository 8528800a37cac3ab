// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Turning morphologies into simulator-ready compartments, and mapping
//! locations between the two forms

pub mod engine;
pub mod mapper;
pub mod range;

pub use engine::{
    Compartmentalisation, CompartmentalisationError, DivisionsCompartmentalisation,
    MorphCompartmentalisation, OriginalCompartmentalisation, Recompartmentalisation,
};
pub use mapper::{MapperError, RangeMapping, SegmentLocMapper};
pub use range::SegmentRange;
