// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Neurite
//!
//! A neuronal morphology kernel: cells built from segments and sections,
//! equation-driven parameterisations over the membrane, location choosers for
//! synapse placement, and recompartmentalisation into simulator-ready
//! cylinders with exact location mapping back to the original morphology.

pub mod cell;
pub mod chooser;
pub mod compartment;
pub mod expression;
pub mod utils;

pub use cell::{
    Cell, CellError, Frustum, ParameterisedGroup, Section, Segment, SegmentLocation,
    VariableMechanism,
};
pub use chooser::{
    ChooserError, GroupDistributedSegments, IndividualSegments, SegmentChooser,
    SegmentLocationChooser,
};
pub use compartment::{
    Compartmentalisation, CompartmentalisationError, DivisionsCompartmentalisation,
    MorphCompartmentalisation, OriginalCompartmentalisation, Recompartmentalisation,
    SegmentLocMapper, SegmentRange,
};
pub use expression::{parse_expression, Bindings, EquationError, EquationUnit};

use anyhow::Result;
use rand::RngCore;

/// Parse and evaluate an equation in one step, with the variables taken from
/// the binding map
pub fn evaluate(source: &str, bindings: &Bindings, rng: &mut dyn RngCore) -> Result<f64> {
    let names: Vec<&str> = bindings.keys().map(|k| k.as_str()).collect();
    let unit = parse_expression(source, &names)?;
    Ok(unit.evaluate_at(bindings, rng)?)
}

/// Recompartmentalise a cell using the division-based strategy
pub fn reduce(cell: &Cell) -> Result<Compartmentalisation> {
    Ok(DivisionsCompartmentalisation.generate(cell)?)
}
