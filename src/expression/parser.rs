// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Neurite Team.

//! Equation parser using pest

use crate::expression::unit::{BasicFunction, BinaryOp, EquationUnit};
use crate::expression::EquationError;
use pest::iterators::Pairs;
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "expression/equation.pest"]
struct EquationParser;

fn pratt() -> PrattParser<Rule> {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::subtract, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
        .op(Op::prefix(Rule::negate))
        .op(Op::infix(Rule::power, Assoc::Right))
}

/// Parse an equation over the given variables into an [`EquationUnit`].
///
/// Any identifier that is neither a known function name nor listed in
/// `variables` is rejected at parse time, so evaluation can only fail on a
/// binding mismatch, never on a symbol the caller has not seen.
pub fn parse_expression(
    source: &str,
    variables: &[&str],
) -> Result<EquationUnit, EquationError> {
    let mut pairs = EquationParser::parse(Rule::program, source)
        .map_err(|e| EquationError::Syntax(e.to_string()))?;

    let program = pairs.next().ok_or_else(|| {
        EquationError::Syntax("empty input".to_string())
    })?;
    let expr = program
        .into_inner()
        .find(|p| p.as_rule() == Rule::expr)
        .ok_or_else(|| EquationError::Syntax("no expression found".to_string()))?;

    build_expr(expr.into_inner(), variables)
}

fn build_expr(pairs: Pairs<Rule>, variables: &[&str]) -> Result<EquationUnit, EquationError> {
    pratt()
        .map_primary(|primary| match primary.as_rule() {
            Rule::number => {
                let value: f64 = primary
                    .as_str()
                    .parse()
                    .map_err(|_| EquationError::Syntax(primary.as_str().to_string()))?;
                Ok(EquationUnit::Constant(value))
            }
            Rule::ident => {
                let name = primary.as_str();
                if variables.contains(&name) {
                    Ok(EquationUnit::Variable(name.to_string()))
                } else {
                    Err(EquationError::UnknownSymbol(name.to_string()))
                }
            }
            Rule::function_call => {
                let mut inner = primary.into_inner();
                let name = inner.next().expect("function name").as_str();
                let function = BasicFunction::from_name(name)
                    .ok_or_else(|| EquationError::UnknownFunction(name.to_string()))?;
                let argument = inner.next().expect("function argument");
                Ok(EquationUnit::Function {
                    function,
                    argument: Box::new(build_expr(argument.into_inner(), variables)?),
                })
            }
            Rule::expr => build_expr(primary.into_inner(), variables),
            rule => Err(EquationError::Syntax(format!(
                "unexpected rule {rule:?}"
            ))),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            // -x is lowered to (-1) * x, matching the evaluation tree shape
            Rule::negate => Ok(EquationUnit::Binary {
                op: BinaryOp::Multiply,
                left: Box::new(EquationUnit::Constant(-1.0)),
                right: Box::new(rhs?),
            }),
            rule => Err(EquationError::Syntax(format!(
                "unexpected prefix {rule:?}"
            ))),
        })
        .map_infix(|lhs, op, rhs| {
            let op = match op.as_rule() {
                Rule::add => BinaryOp::Add,
                Rule::subtract => BinaryOp::Subtract,
                Rule::multiply => BinaryOp::Multiply,
                Rule::divide => BinaryOp::Divide,
                Rule::power => BinaryOp::Power,
                rule => {
                    return Err(EquationError::Syntax(format!(
                        "unexpected operator {rule:?}"
                    )))
                }
            };
            Ok(EquationUnit::Binary {
                op,
                left: Box::new(lhs?),
                right: Box::new(rhs?),
            })
        })
        .parse(pairs)
}
