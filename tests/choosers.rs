// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Location chooser behaviour over sample morphologies

use anyhow::Result;
use neurite::cell::samples;
use neurite::cell::DENDRITE_GROUP;
use neurite::{
    ChooserError, GroupDistributedSegments, IndividualSegments, SegmentChooser,
    SegmentLocationChooser,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_individual_segments_midpoints_in_order() -> Result<()> {
    let cell = samples::simple_cell();
    let mut rng = StdRng::seed_from_u64(11);
    let mut chooser = IndividualSegments::new(vec![2, 3]);
    chooser.initialise(&cell, &mut rng)?;

    let first = chooser.next_seg_loc()?;
    assert_eq!((first.segment, first.fraction_along), (2, 0.5));
    let second = chooser.next_seg_loc()?;
    assert_eq!((second.segment, second.fraction_along), (3, 0.5));
    assert!(matches!(
        chooser.next_seg_loc(),
        Err(ChooserError::AllChosen)
    ));
    Ok(())
}

#[test]
fn test_next_before_initialise_fails() {
    let mut chooser = GroupDistributedSegments::new(DENDRITE_GROUP, 3);
    assert!(matches!(
        chooser.next_seg_loc(),
        Err(ChooserError::NotInitialised)
    ));
}

#[test]
fn test_distribution_follows_segment_length() -> Result<()> {
    // The dendrite group is a 10 long segment followed by a 90 long one, so
    // close to 90% of locations should land on the longer segment
    let cell = samples::simple_cell();
    let mut rng = StdRng::seed_from_u64(99);
    let mut chooser = GroupDistributedSegments::new(DENDRITE_GROUP, 2000);
    chooser.initialise(&cell, &mut rng)?;

    let mut on_long = 0usize;
    let mut total = 0usize;
    while let Ok(location) = chooser.next_seg_loc() {
        assert!(location.segment == 1 || location.segment == 2);
        assert!((0.0..=1.0).contains(&location.fraction_along));
        if location.segment == 2 {
            on_long += 1;
        }
        total += 1;
    }

    assert_eq!(total, 2000);
    let share = on_long as f64 / total as f64;
    assert!(
        (0.85..=0.95).contains(&share),
        "expected ~0.9 of draws on the long segment, got {share}"
    );
    Ok(())
}

#[test]
fn test_same_seed_same_sequence() -> Result<()> {
    let cell = samples::branched_cell();
    let run = |seed: u64| -> Result<Vec<(u32, f64)>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut chooser = SegmentChooser::GroupDistributed(GroupDistributedSegments::new(
            DENDRITE_GROUP,
            50,
        ));
        chooser.initialise(&cell, &mut rng)?;
        let mut out = Vec::new();
        while let Ok(location) = chooser.next_seg_loc() {
            out.push((location.segment, location.fraction_along));
        }
        Ok(out)
    };

    assert_eq!(run(21)?, run(21)?);
    assert_ne!(run(21)?, run(22)?);
    Ok(())
}

#[test]
fn test_chooser_enum_delegates() -> Result<()> {
    let cell = samples::simple_cell();
    let mut rng = StdRng::seed_from_u64(4);
    let mut chooser = SegmentChooser::Individual(IndividualSegments::new(vec![1]));
    chooser.initialise(&cell, &mut rng)?;

    assert!(!chooser.description().is_empty());
    assert_eq!(chooser.next_seg_loc()?.segment, 1);
    Ok(())
}
