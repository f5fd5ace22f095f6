use log::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::ModelBuilder;
use crate::problem::ProblemSpec;
use crate::report::{ReportFile, ReportRow, build_rows};
use crate::solver::{self, SolveResult};

/// A solved problem and the rows that were written for it.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub result: SolveResult,
    pub rows: Vec<ReportRow>,
}

/// Build, solve, and persist the report.
///
/// The report file is only touched when the solver reaches an optimal
/// solution; any other status is returned as [`Error::Solver`].
pub fn run(spec: &ProblemSpec, config: &Config) -> Result<Outcome> {
    let model = ModelBuilder::new(config.aux_sign).build(spec)?;
    let names = model.names().to_vec();
    info!(
        "solving {:?} problem with {} variables and {} constraints",
        model.sense(),
        model.variable_count(),
        model.constraint_count()
    );

    let result = solver::solve(model);
    if !result.is_optimal() {
        warn!("no optimal solution ({}), report left untouched", result.status);
        return Err(Error::Solver(result.status));
    }

    let rows = build_rows(&result, &names);
    ReportFile::new(&config.report_path).persist(&rows)?;

    Ok(Outcome { result, rows })
}

/// Load the last persisted report.
pub fn show_last(config: &Config) -> Result<Vec<ReportRow>> {
    ReportFile::new(&config.report_path).load()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Constraint, ConstraintOp, Sense};
    use crate::report::{OBJECTIVE_LABEL, objective_of};
    use crate::solver::SolveStatus;

    fn temp_config(name: &str) -> Config {
        let path = std::env::temp_dir().join(format!("lpreport-workflow-{}-{name}.yaml", std::process::id()));
        let _ = std::fs::remove_file(&path);
        Config::default().with_report_path(path).with_chart(false)
    }

    fn spec(constraints: Vec<(Vec<f64>, ConstraintOp, f64)>, objective: Vec<f64>) -> ProblemSpec {
        let constraints = constraints
            .into_iter()
            .map(|(coefficients, operator, rhs)| Constraint {
                coefficients,
                operator,
                rhs,
            })
            .collect();
        ProblemSpec::new(Sense::Maximize, objective, constraints, vec![])
    }

    #[test]
    fn optimal_solve_writes_report() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = temp_config("optimal");
        let spec = spec(
            vec![(vec![1.0, 1.0], ConstraintOp::LessOrEqual, 4.0)],
            vec![3.0, 2.0],
        );

        let outcome = run(&spec, &config).unwrap();
        let loaded = show_last(&config).unwrap();
        std::fs::remove_file(&config.report_path).unwrap();

        assert_eq!(outcome.result.status, SolveStatus::Optimal);
        assert_eq!(loaded, outcome.rows);
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[2].label, OBJECTIVE_LABEL);
        assert!((objective_of(&loaded).unwrap() - 12.0).abs() < 1e-6);
    }

    #[test]
    fn infeasible_solve_keeps_previous_report() {
        let _ = env_logger::builder().is_test(true).try_init();
        let config = temp_config("infeasible");
        let previous = vec![ReportRow::new("x1", 1.0), ReportRow::new(OBJECTIVE_LABEL, 1.0)];
        ReportFile::new(&config.report_path).persist(&previous).unwrap();

        let spec = spec(
            vec![
                (vec![1.0], ConstraintOp::GreaterOrEqual, 5.0),
                (vec![1.0], ConstraintOp::LessOrEqual, 1.0),
            ],
            vec![1.0],
        );
        let error = run(&spec, &config).unwrap_err();
        let loaded = show_last(&config).unwrap();
        std::fs::remove_file(&config.report_path).unwrap();

        assert!(matches!(error, Error::Solver(SolveStatus::Infeasible)));
        assert_eq!(loaded, previous);
    }

    #[test]
    fn inconsistent_input_never_reaches_the_solver() {
        let config = temp_config("inconsistent");
        let spec = spec(vec![(vec![1.0], ConstraintOp::LessOrEqual, 4.0)], vec![3.0, 2.0]);

        assert!(matches!(run(&spec, &config), Err(Error::Consistency(_))));
        assert!(matches!(show_last(&config), Err(Error::NoReport(_))));
    }
}
