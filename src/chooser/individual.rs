// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Chooser yielding the midpoint of each listed segment exactly once

use crate::chooser::{ChooserError, SegmentLocationChooser};
use crate::cell::{Cell, SegmentLocation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Yields `(id, 0.5)` for each configured segment id, in listed order.
///
/// Initialisation verifies that every id exists on the cell; iteration is
/// deterministic and ignores the random generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndividualSegments {
    segment_ids: Vec<u32>,
    #[serde(skip)]
    position: Option<usize>,
}

impl IndividualSegments {
    pub fn new(segment_ids: Vec<u32>) -> Self {
        Self {
            segment_ids,
            position: None,
        }
    }

    pub fn segment_ids(&self) -> &[u32] {
        &self.segment_ids
    }
}

impl SegmentLocationChooser for IndividualSegments {
    fn initialise(&mut self, cell: &Cell, _rng: &mut dyn RngCore) -> Result<(), ChooserError> {
        for &id in &self.segment_ids {
            if cell.segment(id).is_none() {
                return Err(ChooserError::NoSuchSegment(id));
            }
        }
        self.position = Some(0);
        Ok(())
    }

    fn next_seg_loc(&mut self) -> Result<SegmentLocation, ChooserError> {
        let position = self.position.ok_or(ChooserError::NotInitialised)?;
        let &id = self
            .segment_ids
            .get(position)
            .ok_or(ChooserError::AllChosen)?;
        self.position = Some(position + 1);
        Ok(SegmentLocation::new(id, 0.5))
    }

    fn description(&self) -> String {
        format!("Middle of segments: {:?}", self.segment_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::samples;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_yields_each_once_in_order() {
        let cell = samples::simple_cell();
        let mut rng = StdRng::seed_from_u64(0);
        let mut chooser = IndividualSegments::new(vec![2, 3]);
        chooser.initialise(&cell, &mut rng).unwrap();

        assert_eq!(chooser.next_seg_loc().unwrap(), SegmentLocation::new(2, 0.5));
        assert_eq!(chooser.next_seg_loc().unwrap(), SegmentLocation::new(3, 0.5));
        assert!(matches!(
            chooser.next_seg_loc(),
            Err(ChooserError::AllChosen)
        ));
    }

    #[test]
    fn test_requires_initialisation() {
        let mut chooser = IndividualSegments::new(vec![1]);
        assert!(matches!(
            chooser.next_seg_loc(),
            Err(ChooserError::NotInitialised)
        ));
    }

    #[test]
    fn test_unknown_id_rejected() {
        let cell = samples::simple_cell();
        let mut rng = StdRng::seed_from_u64(0);
        let mut chooser = IndividualSegments::new(vec![1, 99]);
        assert!(matches!(
            chooser.initialise(&cell, &mut rng),
            Err(ChooserError::NoSuchSegment(99))
        ));
    }

    #[test]
    fn test_reinitialise_resets() {
        let cell = samples::simple_cell();
        let mut rng = StdRng::seed_from_u64(0);
        let mut chooser = IndividualSegments::new(vec![1]);
        chooser.initialise(&cell, &mut rng).unwrap();
        chooser.next_seg_loc().unwrap();
        chooser.initialise(&cell, &mut rng).unwrap();
        assert_eq!(chooser.next_seg_loc().unwrap(), SegmentLocation::new(1, 0.5));
    }
}
