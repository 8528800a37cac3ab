// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Parameterised groups and spatially varying mechanism densities
//!
//! A parameterised group turns a location on the cell into a scalar
//! parameter, usually a normalised path distance. A variable mechanism pairs
//! a parameterised group with an expression in that parameter, giving a
//! conductance density that varies over the membrane.

use crate::cell::morphology::{Cell, CellError};
use crate::cell::segment::SegmentLocation;
use crate::expression::{Bindings, EquationError, EquationUnit};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error(transparent)]
    Cell(#[from] CellError),

    #[error(transparent)]
    Equation(#[from] EquationError),
}

/// Metric a parameterised group measures along the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    /// Path length along segments from the root of the cell
    PathLengthFromRoot,
}

/// How the proximal end of the group maps onto the parameter axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProximalPref {
    /// Use raw metric values
    NoTranslation,
    /// Shift so the most proximal point of the group sits at 0
    MostProxAt0,
}

/// How the distal end of the group maps onto the parameter axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistalPref {
    /// Use raw (possibly translated) metric values
    NoNormalisation,
    /// Scale so the most distal point of the group sits at 1
    MostDistAt1,
}

/// A scalar parameterisation over the segments of one group.
///
/// Evaluating the group at a [`SegmentLocation`] yields the metric value at
/// that point, translated and normalised per the proximal and distal
/// preferences. The location must lie on a segment of the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterisedGroup {
    pub name: String,
    /// Name of the section group this parameterisation covers
    pub group: String,
    pub metric: Metric,
    pub proximal: ProximalPref,
    pub distal: DistalPref,
    /// Name of the variable this group exposes to expressions, e.g. "p"
    pub variable: String,
}

impl ParameterisedGroup {
    pub fn new(
        name: impl Into<String>,
        group: impl Into<String>,
        metric: Metric,
        proximal: ProximalPref,
        distal: DistalPref,
        variable: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            group: group.into(),
            metric,
            proximal,
            distal,
            variable: variable.into(),
        }
    }

    /// Parameter value at a location on the cell
    pub fn evaluate_at(
        &self,
        cell: &Cell,
        location: SegmentLocation,
    ) -> Result<f64, CellError> {
        let segment = cell.segment(location.segment).ok_or(CellError::NoSuchSegment(location.segment))?;
        if !cell.sections()[segment.section].in_group(&self.group) {
            return Err(CellError::NotInGroup {
                segment: location.segment,
                group: self.group.clone(),
            });
        }

        let raw = match self.metric {
            Metric::PathLengthFromRoot => cell.length_from_root(location)?,
        };

        let translated = match self.proximal {
            ProximalPref::NoTranslation => raw,
            ProximalPref::MostProxAt0 => raw - cell.min_length_from_root(&self.group),
        };

        let value = match self.distal {
            DistalPref::NoNormalisation => translated,
            DistalPref::MostDistAt1 => {
                let min = cell.min_length_from_root(&self.group);
                let max = cell.max_length_from_root(&self.group);
                let span = match self.proximal {
                    ProximalPref::NoTranslation => max,
                    ProximalPref::MostProxAt0 => max - min,
                };
                if span == 0.0 {
                    0.0
                } else {
                    translated / span
                }
            }
        };

        debug!(group = %self.name, %location, value, "parameterised group evaluated");
        Ok(value)
    }

    /// Smallest value the parameterisation takes over the group
    pub fn min_value(&self, cell: &Cell) -> f64 {
        match (self.proximal, self.distal) {
            (ProximalPref::NoTranslation, _) => {
                let min = cell.min_length_from_root(&self.group);
                match self.distal {
                    DistalPref::NoNormalisation => min,
                    DistalPref::MostDistAt1 => {
                        let max = cell.max_length_from_root(&self.group);
                        if max == 0.0 {
                            0.0
                        } else {
                            min / max
                        }
                    }
                }
            }
            (ProximalPref::MostProxAt0, _) => 0.0,
        }
    }

    /// Largest value the parameterisation takes over the group
    pub fn max_value(&self, cell: &Cell) -> f64 {
        match self.distal {
            DistalPref::MostDistAt1 => {
                if cell.max_length_from_root(&self.group) == 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            DistalPref::NoNormalisation => {
                let max = cell.max_length_from_root(&self.group);
                match self.proximal {
                    ProximalPref::NoTranslation => max,
                    ProximalPref::MostProxAt0 => max - cell.min_length_from_root(&self.group),
                }
            }
        }
    }
}

/// A membrane mechanism whose density varies with a group parameterisation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMechanism {
    /// Mechanism name, e.g. "KConductance"
    pub name: String,
    /// Name of the [`ParameterisedGroup`] providing the expression variable
    pub parameterised_group: String,
    /// Density as a function of the group's variable
    pub expression: EquationUnit,
}

impl VariableMechanism {
    pub fn new(
        name: impl Into<String>,
        parameterised_group: impl Into<String>,
        expression: EquationUnit,
    ) -> Self {
        Self {
            name: name.into(),
            parameterised_group: parameterised_group.into(),
            expression,
        }
    }

    /// Density at a location: evaluate the group parameter there, bind it to
    /// the group's variable and evaluate the expression
    pub fn density_at(
        &self,
        cell: &Cell,
        location: SegmentLocation,
        rng: &mut dyn RngCore,
    ) -> Result<f64, ParameterError> {
        let group = cell
            .parameterised_group(&self.parameterised_group)
            .ok_or_else(|| {
                CellError::NoSuchParameterisedGroup(self.parameterised_group.clone())
            })?;

        let value = group.evaluate_at(cell, location)?;
        let mut bindings = Bindings::new();
        bindings.insert(group.variable.clone(), value);

        Ok(self.expression.evaluate_at(&bindings, rng)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::samples;
    use crate::cell::segment::DENDRITE_GROUP;
    use crate::expression::parse_expression;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn path_group(proximal: ProximalPref, distal: DistalPref) -> ParameterisedGroup {
        ParameterisedGroup::new(
            "DendLen",
            DENDRITE_GROUP,
            Metric::PathLengthFromRoot,
            proximal,
            distal,
            "p",
        )
    }

    #[test]
    fn test_raw_path_length() {
        let cell = samples::simple_cell();
        let g = path_group(ProximalPref::NoTranslation, DistalPref::NoNormalisation);
        let v = g
            .evaluate_at(&cell, SegmentLocation::new(2, 0.5))
            .unwrap();
        assert_relative_eq!(v, 55.0);
    }

    #[test]
    fn test_normalised_path_length() {
        let cell = samples::simple_cell();
        let g = path_group(ProximalPref::MostProxAt0, DistalPref::MostDistAt1);
        let end = g
            .evaluate_at(&cell, SegmentLocation::new(2, 1.0))
            .unwrap();
        assert_relative_eq!(end, 1.0);
        let mid = g
            .evaluate_at(&cell, SegmentLocation::new(2, 0.5))
            .unwrap();
        assert_relative_eq!(mid, 0.55);

        assert_relative_eq!(g.min_value(&cell), 0.0);
        assert_relative_eq!(g.max_value(&cell), 1.0);
    }

    #[test]
    fn test_location_outside_group_rejected() {
        let cell = samples::simple_cell();
        let g = path_group(ProximalPref::NoTranslation, DistalPref::NoNormalisation);
        // Segment 0 is the soma, not a dendrite
        let err = g
            .evaluate_at(&cell, SegmentLocation::new(0, 0.5))
            .unwrap_err();
        assert!(matches!(err, CellError::NotInGroup { segment: 0, .. }));
    }

    #[test]
    fn test_variable_mechanism_density() {
        let mut cell = samples::simple_cell();
        cell.add_parameterised_group(path_group(
            ProximalPref::MostProxAt0,
            DistalPref::MostDistAt1,
        ));

        let expr = parse_expression("10 + 5 * p", &["p"]).unwrap();
        let mech = VariableMechanism::new("KConductance", "DendLen", expr);

        let mut rng = StdRng::seed_from_u64(7);
        let density = mech
            .density_at(&cell, SegmentLocation::new(2, 1.0), &mut rng)
            .unwrap();
        assert_relative_eq!(density, 15.0);
    }

    #[test]
    fn test_unknown_parameterised_group() {
        let cell = samples::simple_cell();
        let expr = parse_expression("p", &["p"]).unwrap();
        let mech = VariableMechanism::new("NaConductance", "NoSuchGroup", expr);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(mech
            .density_at(&cell, SegmentLocation::new(1, 0.5), &mut rng)
            .is_err());
    }
}
