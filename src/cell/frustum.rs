// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Conical frustum math for compartment geometry
//!
//! A segment of a morphology is a conical frustum (or a cylinder when the
//! radii match). Formulas from http://mathworld.wolfram.com/ConicalFrustum.html

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A conical frustum: two radii and the height between the faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frustum {
    pub start_radius: f64,
    pub end_radius: f64,
    pub height: f64,
}

impl Frustum {
    pub fn new(start_radius: f64, end_radius: f64, height: f64) -> Self {
        Self {
            start_radius,
            end_radius,
            height,
        }
    }

    /// Lateral (curved) surface area, excluding the end faces
    pub fn curved_surface_area(&self) -> f64 {
        if self.start_radius == self.end_radius {
            return 2.0 * PI * self.start_radius * self.height;
        }

        let sum = self.start_radius + self.end_radius;
        let diff = self.start_radius - self.end_radius;
        let slant = (diff * diff + self.height * self.height).sqrt();

        PI * sum * slant
    }

    pub fn volume(&self) -> f64 {
        let radii = self.start_radius * self.start_radius
            + self.start_radius * self.end_radius
            + self.end_radius * self.end_radius;

        (1.0 / 3.0) * PI * self.height * radii
    }

    /// Radius of the cylinder with the same height and curved surface area
    pub fn equivalent_radius(&self) -> f64 {
        if self.start_radius == self.end_radius {
            return self.end_radius;
        }
        self.curved_surface_area() / (2.0 * PI * self.height)
    }
}

/// Total height of a chain of frusta laid end to end
pub fn chain_length(frusta: &[Frustum]) -> f64 {
    frusta.iter().map(|f| f.height).sum()
}

/// Total curved surface area of a chain of frusta
pub fn chain_surface_area(frusta: &[Frustum]) -> f64 {
    frusta.iter().map(|f| f.curved_surface_area()).sum()
}

/// Curved surface area of a chain truncated at `fraction_from_start` of its
/// total height, cut in a plane perpendicular to the axis
pub fn fractional_surface_area(frusta: &[Frustum], fraction_from_start: f64) -> f64 {
    let fraction = fraction_from_start.clamp(0.0, 1.0);
    let total_length = chain_length(frusta);
    let cut = total_length * fraction;

    let mut area = 0.0;
    let mut traversed = 0.0;

    for f in frusta {
        if traversed + f.height <= cut {
            area += f.curved_surface_area();
            traversed += f.height;
        } else if traversed < cut {
            let remainder = cut - traversed;
            let partial_end = f.start_radius
                + (f.end_radius - f.start_radius) * (remainder / f.height);
            area += Frustum::new(f.start_radius, partial_end, remainder).curved_surface_area();
            traversed = cut;
        }
    }

    area
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cylinder_area() {
        let cyl = Frustum::new(2.0, 2.0, 10.0);
        assert_relative_eq!(cyl.curved_surface_area(), 2.0 * PI * 2.0 * 10.0);
    }

    #[test]
    fn test_frustum_area() {
        // r1=3, r2=1, h=4: slant = sqrt(4 + 16) = sqrt(20)
        let f = Frustum::new(3.0, 1.0, 4.0);
        let expected = PI * 4.0 * 20.0_f64.sqrt();
        assert_relative_eq!(f.curved_surface_area(), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_volume() {
        // Cone-like check: cylinder volume
        let cyl = Frustum::new(2.0, 2.0, 5.0);
        assert_relative_eq!(cyl.volume(), PI * 4.0 * 5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_equivalent_radius_preserves_area() {
        let f = Frustum::new(2.0, 4.0, 10.0);
        let r = f.equivalent_radius();
        let cyl = Frustum::new(r, r, 10.0);
        assert_relative_eq!(
            cyl.curved_surface_area(),
            f.curved_surface_area(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fractional_surface_area_endpoints() {
        let chain = [Frustum::new(2.0, 4.0, 10.0), Frustum::new(4.0, 3.0, 8.0)];
        assert_relative_eq!(fractional_surface_area(&chain, 0.0), 0.0);
        assert_relative_eq!(
            fractional_surface_area(&chain, 1.0),
            chain_surface_area(&chain),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fractional_surface_area_is_monotonic() {
        let chain = [Frustum::new(2.0, 4.0, 10.0), Frustum::new(4.0, 3.0, 8.0)];
        let mut last = 0.0;
        for i in 1..=10 {
            let a = fractional_surface_area(&chain, i as f64 / 10.0);
            assert!(a >= last);
            last = a;
        }
    }
}
