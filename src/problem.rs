use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Whether the objective is maximized or minimized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[serde(alias = "max")]
    Maximize,
    #[serde(alias = "min")]
    Minimize,
}

impl FromStr for Sense {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "max" | "maximize" | "maximise" => Ok(Sense::Maximize),
            "2" | "min" | "minimize" | "minimise" => Ok(Sense::Minimize),
            _ => Err(Error::Sense(s.to_owned())),
        }
    }
}

/// Comparison operator of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum ConstraintOp {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

impl FromStr for ConstraintOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "<=" => Ok(ConstraintOp::LessOrEqual),
            "=" | "==" => Ok(ConstraintOp::Equal),
            ">=" => Ok(ConstraintOp::GreaterOrEqual),
            other => Err(Error::Operator(other.to_owned())),
        }
    }
}

impl TryFrom<String> for ConstraintOp {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConstraintOp::LessOrEqual => "<=",
            ConstraintOp::Equal => "=",
            ConstraintOp::GreaterOrEqual => ">=",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecisionVariable {
    pub name: String,
    pub coefficient: f64,
}

/// Non-negative slack/surplus variable with its own objective coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxVariable {
    pub name: String,
    pub coefficient: f64,
    /// When set, the model gets `x<i> + s<i> == demand`.
    pub demand: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Constraint {
    pub coefficients: Vec<f64>,
    pub operator: ConstraintOp,
    pub rhs: f64,
}

/// A complete problem, ready to be handed to the model builder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProblemFile")]
pub struct ProblemSpec {
    pub sense: Sense,
    pub variables: Vec<DecisionVariable>,
    pub constraints: Vec<Constraint>,
    pub auxiliary: Vec<AuxVariable>,
}

/// On-disk shape of a problem: variable names are generated, not read.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProblemFile {
    sense: Sense,
    objective: Vec<f64>,
    #[serde(default)]
    constraints: Vec<Constraint>,
    #[serde(default)]
    auxiliary: Vec<AuxFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AuxFile {
    coefficient: f64,
    demand: Option<f64>,
}

impl From<ProblemFile> for ProblemSpec {
    fn from(file: ProblemFile) -> Self {
        let auxiliary = file
            .auxiliary
            .into_iter()
            .map(|aux| (aux.coefficient, aux.demand))
            .collect();
        ProblemSpec::new(file.sense, file.objective, file.constraints, auxiliary)
    }
}

pub fn decision_name(index: usize) -> String {
    format!("x{}", index + 1)
}

pub fn auxiliary_name(index: usize) -> String {
    format!("s{}", index + 1)
}

impl ProblemSpec {
    /// Build a spec from bare coefficients, generating `x<i>` and `s<i>` names.
    pub fn new(
        sense: Sense,
        objective: Vec<f64>,
        constraints: Vec<Constraint>,
        auxiliary: Vec<(f64, Option<f64>)>,
    ) -> Self {
        let variables = objective
            .into_iter()
            .enumerate()
            .map(|(i, coefficient)| DecisionVariable {
                name: decision_name(i),
                coefficient,
            })
            .collect();
        let auxiliary = auxiliary
            .into_iter()
            .enumerate()
            .map(|(i, (coefficient, demand))| AuxVariable {
                name: auxiliary_name(i),
                coefficient,
                demand,
            })
            .collect();

        ProblemSpec {
            sense,
            variables,
            constraints,
            auxiliary,
        }
    }

    /// Demand equalities as `(index, demand)`, tying `x<index>` to `s<index>`.
    pub fn demand_equalities(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.auxiliary
            .iter()
            .enumerate()
            .filter_map(|(i, aux)| aux.demand.map(|demand| (i, demand)))
    }

    /// Names in declaration order: decision variables first, then auxiliaries.
    pub fn names(&self) -> Vec<String> {
        self.variables
            .iter()
            .map(|v| v.name.clone())
            .chain(self.auxiliary.iter().map(|s| s.name.clone()))
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.variables.len();
        if n == 0 {
            return Err(Error::Consistency(
                "at least one decision variable is required".into(),
            ));
        }

        for (i, constraint) in self.constraints.iter().enumerate() {
            if constraint.coefficients.len() != n {
                return Err(Error::Consistency(format!(
                    "constraint {} has {} coefficients but there are {} variables",
                    i + 1,
                    constraint.coefficients.len(),
                    n
                )));
            }
        }

        for (i, _) in self.demand_equalities() {
            if i >= n {
                return Err(Error::Consistency(format!(
                    "{} has a demand but there is no {}",
                    auxiliary_name(i),
                    decision_name(i)
                )));
            }
        }

        let non_finite = self
            .variables
            .iter()
            .map(|v| v.coefficient)
            .chain(self.auxiliary.iter().map(|s| s.coefficient))
            .chain(self.auxiliary.iter().filter_map(|s| s.demand))
            .chain(
                self.constraints
                    .iter()
                    .flat_map(|c| c.coefficients.iter().copied().chain([c.rhs])),
            )
            .any(|value| !value.is_finite());
        if non_finite {
            return Err(Error::Consistency("all coefficients must be finite".into()));
        }

        Ok(())
    }
}
