use good_lp::variable::UnsolvedProblem;
use good_lp::{ResolutionError, Solution as LpSolution, SolverModel};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::Model;
use crate::problem::Sense;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    /// The solver stopped for any other reason.
    Undefined,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unbounded => "UNBOUNDED",
            SolveStatus::Undefined => "UNDEFINED",
        })
    }
}

impl From<&ResolutionError> for SolveStatus {
    fn from(error: &ResolutionError) -> Self {
        match error {
            ResolutionError::Infeasible => SolveStatus::Infeasible,
            ResolutionError::Unbounded => SolveStatus::Unbounded,
            _ => SolveStatus::Undefined,
        }
    }
}

/// Outcome of one solver call.
///
/// `objective` and `values` are only populated when `status` is
/// [`SolveStatus::Optimal`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub objective: Option<f64>,
    pub values: BTreeMap<String, f64>,
}

impl SolveResult {
    fn failed(status: SolveStatus) -> Self {
        SolveResult {
            status,
            objective: None,
            values: BTreeMap::new(),
        }
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

#[cfg(not(feature = "cbc"))]
fn create_solver_model(problem: UnsolvedProblem) -> impl SolverModel<Error = ResolutionError> {
    problem.using(good_lp::solvers::microlp::microlp)
}

#[cfg(feature = "cbc")]
fn create_solver_model(problem: UnsolvedProblem) -> impl SolverModel<Error = ResolutionError> {
    let mut model = problem.using(good_lp::solvers::coin_cbc::coin_cbc);
    model.set_parameter("loglevel", "0");
    model
}

/// Hand the model to the solver and collect status, objective and values.
pub fn solve(model: Model) -> SolveResult {
    let Model {
        variables,
        sense,
        objective,
        constraints,
        handles,
        names,
    } = model;

    let unsolved = match sense {
        Sense::Maximize => variables.maximise(objective.clone()),
        Sense::Minimize => variables.minimise(objective.clone()),
    };
    let problem = constraints
        .into_iter()
        .fold(create_solver_model(unsolved), |m, c| m.with(c));

    match problem.solve() {
        Ok(solution) => {
            let values = names
                .into_iter()
                .zip(handles.iter().map(|&v| solution.value(v)))
                .collect();
            let objective = solution.eval(objective);
            debug!("solver returned OPTIMAL, objective {objective}");

            SolveResult {
                status: SolveStatus::Optimal,
                objective: Some(objective),
                values,
            }
        }
        Err(error) => {
            debug!("solver returned {error}");
            SolveResult::failed(SolveStatus::from(&error))
        }
    }
}
