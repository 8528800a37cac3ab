// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Hand-built morphologies used across the test suite and examples

use crate::cell::morphology::Cell;
use crate::cell::segment::{
    Section, Segment, ALL_GROUP, AXON_GROUP, DENDRITE_GROUP, SOMA_GROUP,
};
use nalgebra::Point3;

/// A minimal three-neurite cell: spherical soma, a two-segment dendrite
/// (lengths 10 and 90) and a single axonal segment of length 60.
pub fn simple_cell() -> Cell {
    let mut cell = Cell::new("SimpleCell");

    let soma = cell.add_section(Section::with_groups("Soma", &[SOMA_GROUP, ALL_GROUP]));
    let dend = cell.add_section(Section::with_groups("MainDend", &[DENDRITE_GROUP, ALL_GROUP]));
    let axon = cell.add_section(Section::with_groups("MainAxon", &[AXON_GROUP, ALL_GROUP]));

    cell.add_segment(Segment::spherical(0, "soma", soma, Point3::origin(), 8.0))
        .expect("root");
    cell.add_segment(Segment::cylindrical(
        1,
        "dend_prox",
        dend,
        Point3::origin(),
        Point3::new(0.0, 10.0, 0.0),
        2.0,
        2.0,
        Some(0),
        1.0,
    ))
    .expect("dend_prox");
    cell.add_segment(Segment::cylindrical(
        2,
        "dend_dist",
        dend,
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(0.0, 100.0, 0.0),
        2.0,
        2.0,
        Some(1),
        1.0,
    ))
    .expect("dend_dist");
    cell.add_segment(Segment::cylindrical(
        3,
        "axon",
        axon,
        Point3::origin(),
        Point3::new(0.0, -60.0, 0.0),
        1.0,
        1.0,
        Some(0),
        1.0,
    ))
    .expect("axon");

    cell
}

/// A cell exercising the division-based recompartmentalisation: a cylindrical
/// soma and three dendritic sections with tapering radii and internal division
/// counts of 5, 4 and 5.
pub fn tapered_cell() -> Cell {
    let mut cell = Cell::new("TaperedCell");

    let soma = cell.add_section(Section::with_groups("Soma", &[SOMA_GROUP, ALL_GROUP]));
    let dend_a = cell
        .add_section(Section::with_groups("DendA", &[DENDRITE_GROUP, ALL_GROUP]).with_divisions(5));
    let dend_b = cell
        .add_section(Section::with_groups("DendB", &[DENDRITE_GROUP, ALL_GROUP]).with_divisions(4));
    let dend_c = cell
        .add_section(Section::with_groups("DendC", &[DENDRITE_GROUP, ALL_GROUP]).with_divisions(5));

    cell.add_segment(Segment::cylindrical(
        0,
        "soma",
        soma,
        Point3::origin(),
        Point3::new(0.0, 10.0, 0.0),
        5.0,
        5.0,
        None,
        1.0,
    ))
    .expect("root");
    cell.add_segment(Segment::cylindrical(
        1,
        "dendA",
        dend_a,
        Point3::new(0.0, 10.0, 0.0),
        Point3::new(0.0, 20.0, 0.0),
        2.0,
        4.0,
        Some(0),
        1.0,
    ))
    .expect("dendA");
    cell.add_segment(Segment::cylindrical(
        2,
        "dendB_1",
        dend_b,
        Point3::new(0.0, 20.0, 0.0),
        Point3::new(0.0, 24.0, 0.0),
        4.0,
        3.5,
        Some(1),
        1.0,
    ))
    .expect("dendB_1");
    cell.add_segment(Segment::cylindrical(
        3,
        "dendB_2",
        dend_b,
        Point3::new(0.0, 24.0, 0.0),
        Point3::new(0.0, 28.0, 0.0),
        3.5,
        3.0,
        Some(2),
        1.0,
    ))
    .expect("dendB_2");
    cell.add_segment(Segment::cylindrical(
        4,
        "dendC",
        dend_c,
        Point3::new(0.0, 28.0, 0.0),
        Point3::new(0.0, 40.0, 0.0),
        3.0,
        3.0,
        Some(3),
        1.0,
    ))
    .expect("dendC");

    cell
}

/// A cell with a side branch attached halfway along a dendritic segment,
/// exercising attachment remapping through a recompartmentalisation.
pub fn branched_cell() -> Cell {
    let mut cell = Cell::new("BranchedCell");

    let soma = cell.add_section(Section::with_groups("Soma", &[SOMA_GROUP, ALL_GROUP]));
    let main = cell
        .add_section(Section::with_groups("MainDend", &[DENDRITE_GROUP, ALL_GROUP]).with_divisions(3));
    let side = cell.add_section(Section::with_groups("SideBranch", &[DENDRITE_GROUP, ALL_GROUP]));

    cell.add_segment(Segment::spherical(0, "soma", soma, Point3::origin(), 6.0))
        .expect("root");
    cell.add_segment(Segment::cylindrical(
        1,
        "main_prox",
        main,
        Point3::origin(),
        Point3::new(0.0, 12.0, 0.0),
        3.0,
        2.0,
        Some(0),
        1.0,
    ))
    .expect("main_prox");
    cell.add_segment(Segment::cylindrical(
        2,
        "main_dist",
        main,
        Point3::new(0.0, 12.0, 0.0),
        Point3::new(0.0, 24.0, 0.0),
        2.0,
        1.5,
        Some(1),
        1.0,
    ))
    .expect("main_dist");
    // Attaches halfway along main_prox
    cell.add_segment(Segment::cylindrical(
        3,
        "side",
        side,
        Point3::new(0.0, 6.0, 0.0),
        Point3::new(10.0, 6.0, 0.0),
        1.0,
        1.0,
        Some(1),
        0.5,
    ))
    .expect("side");

    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_are_valid() {
        for cell in [simple_cell(), tapered_cell(), branched_cell()] {
            let report = cell.validity();
            assert!(
                report.is_valid(),
                "{}: {}",
                cell.name(),
                report.summary()
            );
        }
    }
}
