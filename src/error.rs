use std::path::PathBuf;

use thiserror::Error;

use crate::solver::SolveStatus;

/// Everything that can go wrong between reading input and persisting a report.
#[derive(Debug, Error)]
pub enum Error {
    /// A field that should hold a number does not.
    #[error("{field}: '{value}' is not a valid number")]
    Input { field: String, value: String },

    /// A required input field was left empty.
    #[error("{0} is missing")]
    Missing(String),

    /// Constraint operator other than `<=`, `=` or `>=`.
    #[error("unrecognized constraint operator '{0}' (expected <=, = or >=)")]
    Operator(String),

    /// Unrecognized objective sense.
    #[error("unrecognized objective sense '{0}' (expected max or min)")]
    Sense(String),

    /// Dimensions of the problem do not line up.
    #[error("inconsistent problem: {0}")]
    Consistency(String),

    /// The solver did not reach an optimal solution.
    #[error("solver finished with status {0}")]
    Solver(SolveStatus),

    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("no report found at {}, solve a problem first", .0.display())]
    NoReport(PathBuf),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn input(field: impl Into<String>, value: impl Into<String>) -> Self {
        Error::Input {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
