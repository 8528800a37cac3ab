// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Equation parsing and evaluation against hand-computed values

use anyhow::Result;
use approx::assert_relative_eq;
use neurite::{evaluate, parse_expression, Bindings, EquationError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::PI;

fn eval_with(source: &str, name: &str, value: f64) -> Result<f64> {
    let mut bindings = Bindings::new();
    bindings.insert(name.to_string(), value);
    let mut rng = StdRng::seed_from_u64(0);
    evaluate(source, &bindings, &mut rng)
}

#[test]
fn test_trig_at_reference_points() -> Result<()> {
    assert_relative_eq!(eval_with("sin(v)", "v", PI / 2.0)?, 1.0, max_relative = 1e-12);
    assert_relative_eq!(eval_with("cos(v)", "v", 0.0)?, 1.0, max_relative = 1e-12);
    Ok(())
}

#[test]
fn test_polynomial() -> Result<()> {
    assert_relative_eq!(eval_with("v^2 + v^3", "v", 1.0)?, 2.0);
    assert_relative_eq!(eval_with("v^2 + v^3", "v", 3.0)?, 36.0);
    Ok(())
}

#[test]
fn test_step_function_with_negation() -> Result<()> {
    assert_relative_eq!(eval_with("H(100 + (-v))", "v", 99.0)?, 1.0);
    assert_relative_eq!(eval_with("H(100 + (-v))", "v", 101.0)?, 0.0);
    Ok(())
}

#[test]
fn test_exponential_decay_profile() -> Result<()> {
    // A typical density profile over a normalised path parameter
    let at = |p: f64| eval_with("5 * exp(-3 * p)", "p", p);
    assert_relative_eq!(at(0.0)?, 5.0, max_relative = 1e-12);
    assert_relative_eq!(at(1.0)?, 5.0 * (-3.0f64).exp(), max_relative = 1e-12);
    assert!(at(0.5)? > at(1.0)?);
    Ok(())
}

#[test]
fn test_syntax_error_reported() {
    assert!(matches!(
        parse_expression("2 +* v", &["v"]),
        Err(EquationError::Syntax(_))
    ));
}

#[test]
fn test_unknown_variable_reported() {
    assert!(matches!(
        parse_expression("v + w", &["v"]),
        Err(EquationError::UnknownSymbol(w)) if w == "w"
    ));
}

#[test]
fn test_random_stays_in_range() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(77);
    let unit = parse_expression("random(5)", &[])?;
    for _ in 0..200 {
        let value = unit.evaluate_at(&Bindings::new(), &mut rng)?;
        assert!((0.0..5.0).contains(&value));
    }
    Ok(())
}
