// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Equation tree and its evaluation

use crate::expression::{Bindings, EquationError};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operators, in order of increasing precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Power => "^",
        }
    }
}

/// Built-in single-argument functions available in equations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicFunction {
    Sin,
    Cos,
    Tan,
    Exp,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log,
    Sqrt,
    /// Heaviside step: 1 for arguments >= 0, else 0
    Heaviside,
    /// Uniform random value in [0, x)
    Random,
}

impl BasicFunction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(BasicFunction::Sin),
            "cos" => Some(BasicFunction::Cos),
            "tan" => Some(BasicFunction::Tan),
            "exp" => Some(BasicFunction::Exp),
            "ln" => Some(BasicFunction::Ln),
            "log" => Some(BasicFunction::Log),
            "sqrt" => Some(BasicFunction::Sqrt),
            "H" => Some(BasicFunction::Heaviside),
            "random" => Some(BasicFunction::Random),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BasicFunction::Sin => "sin",
            BasicFunction::Cos => "cos",
            BasicFunction::Tan => "tan",
            BasicFunction::Exp => "exp",
            BasicFunction::Ln => "ln",
            BasicFunction::Log => "log",
            BasicFunction::Sqrt => "sqrt",
            BasicFunction::Heaviside => "H",
            BasicFunction::Random => "random",
        }
    }

    fn apply(self, x: f64, rng: &mut dyn RngCore) -> f64 {
        match self {
            BasicFunction::Sin => x.sin(),
            BasicFunction::Cos => x.cos(),
            BasicFunction::Tan => x.tan(),
            BasicFunction::Exp => x.exp(),
            BasicFunction::Ln => x.ln(),
            BasicFunction::Log => x.log10(),
            BasicFunction::Sqrt => x.sqrt(),
            BasicFunction::Heaviside => {
                if x >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            BasicFunction::Random => rng.gen::<f64>() * x,
        }
    }
}

/// A node in a parsed equation.
///
/// Unary minus is not a distinct node; the parser lowers `-x` to
/// `(-1) * x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EquationUnit {
    Constant(f64),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<EquationUnit>,
        right: Box<EquationUnit>,
    },
    Function {
        function: BasicFunction,
        argument: Box<EquationUnit>,
    },
}

impl EquationUnit {
    /// Evaluate with every variable bound. Randomness is drawn from the
    /// caller's generator, so seeded runs reproduce exactly.
    pub fn evaluate_at(
        &self,
        bindings: &Bindings,
        rng: &mut dyn RngCore,
    ) -> Result<f64, EquationError> {
        match self {
            EquationUnit::Constant(value) => Ok(*value),
            EquationUnit::Variable(name) => bindings
                .get(name)
                .copied()
                .ok_or_else(|| EquationError::UnknownVariable(name.clone())),
            EquationUnit::Binary { op, left, right } => {
                let l = left.evaluate_at(bindings, rng)?;
                let r = right.evaluate_at(bindings, rng)?;
                Ok(match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Subtract => l - r,
                    BinaryOp::Multiply => l * r,
                    BinaryOp::Divide => l / r,
                    BinaryOp::Power => l.powf(r),
                })
            }
            EquationUnit::Function { function, argument } => {
                let x = argument.evaluate_at(bindings, rng)?;
                Ok(function.apply(x, rng))
            }
        }
    }

    /// Variables referenced anywhere in the tree
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out.sort_unstable();
        out.dedup();
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            EquationUnit::Constant(_) => {}
            EquationUnit::Variable(name) => out.push(name),
            EquationUnit::Binary { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
            EquationUnit::Function { argument, .. } => argument.collect_variables(out),
        }
    }
}

impl fmt::Display for EquationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationUnit::Constant(value) => write!(f, "{value}"),
            EquationUnit::Variable(name) => write!(f, "{name}"),
            EquationUnit::Binary { op, left, right } => {
                write!(f, "({left} {} {right})", op.symbol())
            }
            EquationUnit::Function { function, argument } => {
                write!(f, "{}({argument})", function.name())
            }
        }
    }
}
