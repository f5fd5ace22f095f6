//! Parsing of free-text fields, as typed at a prompt or passed on the command
//! line, into a [`ProblemSpec`]. Every step returns a `Result` so the caller
//! can decide whether to ask again or give up.

use crate::error::{Error, Result};
use crate::problem::{Constraint, ConstraintOp, ProblemSpec, Sense, auxiliary_name, decision_name};

/// Unparsed problem fields.
#[derive(Debug, Clone, Default)]
pub struct RawProblem {
    /// `max`/`min` (or `1`/`2`).
    pub sense: String,
    /// One coefficient per decision variable.
    pub objective: Vec<String>,
    /// Each entry looks like `1 1 <= 4` or `1, 1 >= 2`.
    pub constraints: Vec<String>,
    /// Each entry is `coefficient` or `coefficient:demand`.
    pub auxiliary: Vec<String>,
}

impl RawProblem {
    pub fn parse(&self) -> Result<ProblemSpec> {
        let sense: Sense = self.sense.parse()?;

        let objective = self
            .objective
            .iter()
            .flat_map(|field| split_numbers(field))
            .enumerate()
            .map(|(i, raw)| parse_number(&format!("coefficient of {}", decision_name(i)), raw))
            .collect::<Result<Vec<_>>>()?;
        if objective.is_empty() {
            return Err(Error::Missing("objective function".into()));
        }

        let constraints = self
            .constraints
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_constraint(i, raw, objective.len()))
            .collect::<Result<Vec<_>>>()?;

        let auxiliary = self
            .auxiliary
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_auxiliary(i, raw))
            .collect::<Result<Vec<_>>>()?;

        let spec = ProblemSpec::new(sense, objective, constraints, auxiliary);
        spec.validate()?;
        Ok(spec)
    }
}

/// Parse a single finite number.
pub fn parse_number(field: &str, raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::Missing(field.to_owned()));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::input(field, trimmed)),
    }
}

fn split_numbers(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
}

/// Parse a row of coefficients that must hold exactly `expected` entries.
pub fn parse_row(field: &str, raw: &str, expected: usize) -> Result<Vec<f64>> {
    let row = split_numbers(raw)
        .enumerate()
        .map(|(i, token)| parse_number(&format!("{field}, coefficient of {}", decision_name(i)), token))
        .collect::<Result<Vec<_>>>()?;

    if row.len() != expected {
        return Err(Error::Consistency(format!(
            "{field} has {} coefficients but there are {expected} variables",
            row.len()
        )));
    }
    Ok(row)
}

/// Parse `<coefficients> <op> <rhs>` for the constraint at `index`.
pub fn parse_constraint(index: usize, raw: &str, variables: usize) -> Result<Constraint> {
    let field = format!("constraint {}", index + 1);

    let is_op = |c: char| matches!(c, '<' | '>' | '=');
    let start = raw.find(is_op).ok_or_else(|| Error::Missing(format!("{field} operator")))?;
    let end = raw[start..]
        .find(|c: char| !is_op(c))
        .map_or(raw.len(), |offset| start + offset);

    let operator: ConstraintOp = raw[start..end].parse()?;
    let coefficients = parse_row(&field, &raw[..start], variables)?;
    let rhs = parse_number(&format!("{field} right-hand side"), &raw[end..])?;

    Ok(Constraint {
        coefficients,
        operator,
        rhs,
    })
}

/// Parse `coefficient` or `coefficient:demand` for the auxiliary at `index`.
pub fn parse_auxiliary(index: usize, raw: &str) -> Result<(f64, Option<f64>)> {
    let name = auxiliary_name(index);
    let (coefficient, demand) = match raw.split_once(':') {
        Some((coefficient, demand)) => (coefficient, Some(demand)),
        None => (raw, None),
    };

    let coefficient = parse_number(&format!("coefficient of {name}"), coefficient)?;
    let demand = demand
        .map(|demand| parse_number(&format!("demand of {name}"), demand))
        .transpose()?;
    Ok((coefficient, demand))
}
