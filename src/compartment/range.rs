// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! A contiguous stretch of a single segment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Part of a segment, from `start_fraction` to `end_fraction` of its length.
///
/// The segment's total length is carried alongside so arc arithmetic never
/// needs the owning cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRange {
    pub segment: u32,
    pub total_length: f64,
    pub start_fraction: f64,
    pub end_fraction: f64,
}

impl SegmentRange {
    /// Fractions are clamped to [0, 1] and swapped if reversed
    pub fn new(segment: u32, total_length: f64, start_fraction: f64, end_fraction: f64) -> Self {
        let a = start_fraction.clamp(0.0, 1.0);
        let b = end_fraction.clamp(0.0, 1.0);
        Self {
            segment,
            total_length,
            start_fraction: a.min(b),
            end_fraction: a.max(b),
        }
    }

    /// Full extent of a segment
    pub fn whole(segment: u32, total_length: f64) -> Self {
        Self::new(segment, total_length, 0.0, 1.0)
    }

    /// Physical length of the covered stretch
    pub fn range_length(&self) -> f64 {
        self.total_length * (self.end_fraction - self.start_fraction)
    }

    pub fn contains(&self, fraction: f64) -> bool {
        (self.start_fraction..=self.end_fraction).contains(&fraction)
    }
}

impl fmt::Display for SegmentRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "seg {} [{} -> {}] of length {}",
            self.segment, self.start_fraction, self.end_fraction, self.total_length
        )
    }
}
