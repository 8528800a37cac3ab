// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Parsing and evaluation of scalar equations over named variables
//!
//! Used wherever a model needs a user-supplied formula, most prominently for
//! variable mechanism densities over a parameterised group.

pub mod parser;
pub mod unit;

use std::collections::HashMap;
use thiserror::Error;

pub use parser::parse_expression;
pub use unit::{BasicFunction, BinaryOp, EquationUnit};

/// Variable name to value map supplied at evaluation time
pub type Bindings = HashMap<String, f64>;

#[derive(Debug, Error)]
pub enum EquationError {
    #[error("could not parse equation: {0}")]
    Syntax(String),

    #[error("unknown symbol in equation: {0}")]
    UnknownSymbol(String),

    #[error("unknown function in equation: {0}")]
    UnknownFunction(String),

    #[error("no value bound for variable {0}")]
    UnknownVariable(String),
}
