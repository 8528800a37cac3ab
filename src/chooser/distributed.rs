// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Chooser drawing locations across a group, weighted by segment length

use crate::chooser::{ChooserError, SegmentLocationChooser};
use crate::cell::{Cell, SegmentLocation};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Draws a fixed number of locations uniformly over the total length of a
/// group: a segment twice as long is twice as likely to be hit, and the
/// fraction along it is uniform.
///
/// All draws happen during initialisation so the sequence is fixed once the
/// generator has been consumed. When every segment in the group has zero
/// length (a group of spherical segments) the draw degenerates to a uniform
/// pick over segments at fraction 0.5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupDistributedSegments {
    group: String,
    number_of_locations: usize,
    #[serde(skip)]
    chosen: Vec<SegmentLocation>,
    #[serde(skip)]
    position: Option<usize>,
}

impl GroupDistributedSegments {
    pub fn new(group: impl Into<String>, number_of_locations: usize) -> Self {
        Self {
            group: group.into(),
            number_of_locations,
            chosen: Vec::new(),
            position: None,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    fn draw(
        segments: &[(u32, f64)],
        total_length: f64,
        rng: &mut dyn RngCore,
    ) -> SegmentLocation {
        if total_length <= 0.0 {
            let pick = rng.gen_range(0..segments.len());
            return SegmentLocation::new(segments[pick].0, 0.5);
        }

        let target = rng.gen::<f64>() * total_length;
        let mut traversed = 0.0;
        for &(id, length) in segments {
            if target <= traversed + length && length > 0.0 {
                return SegmentLocation::new(id, (target - traversed) / length);
            }
            traversed += length;
        }

        // target == total_length after rounding; land on the distal end
        let &(id, _) = segments.last().expect("non-empty group");
        SegmentLocation::new(id, 1.0)
    }
}

impl SegmentLocationChooser for GroupDistributedSegments {
    fn initialise(&mut self, cell: &Cell, rng: &mut dyn RngCore) -> Result<(), ChooserError> {
        let segments: Vec<(u32, f64)> = cell
            .segments_in_group(&self.group)
            .iter()
            .map(|s| (s.id, s.length()))
            .collect();
        if segments.is_empty() {
            return Err(ChooserError::EmptyGroup(self.group.clone()));
        }

        let total_length: f64 = segments.iter().map(|(_, l)| l).sum();
        debug!(
            group = %self.group,
            total_length,
            n = self.number_of_locations,
            "distributing locations over group"
        );

        self.chosen = (0..self.number_of_locations)
            .map(|_| Self::draw(&segments, total_length, rng))
            .collect();
        self.position = Some(0);
        Ok(())
    }

    fn next_seg_loc(&mut self) -> Result<SegmentLocation, ChooserError> {
        let position = self.position.ok_or(ChooserError::NotInitialised)?;
        let location = *self.chosen.get(position).ok_or(ChooserError::AllChosen)?;
        self.position = Some(position + 1);
        Ok(location)
    }

    fn description(&self) -> String {
        format!(
            "{} locations distributed over group {} weighted by segment length",
            self.number_of_locations, self.group
        )
    }
}
