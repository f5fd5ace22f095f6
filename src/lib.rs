//! Assemble a linear program from tabular coefficients, solve it with
//! [`good_lp`], and turn the result into a flat report.
//!
//! ```no_run
//! use lpreport::{Config, ProblemSpec, workflow};
//!
//! let spec: ProblemSpec = serde_yaml::from_str(
//!     "sense: max\nobjective: [3, 2]\nconstraints:\n  - {coefficients: [1, 1], operator: '<=', rhs: 4}\n",
//! )?;
//! let outcome = workflow::run(&spec, &Config::default())?;
//! println!("{:?}", outcome.result.objective);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod problem;
pub mod report;
pub mod solver;
pub mod workflow;

pub use config::Config;
pub use error::{Error, Result};
pub use input::RawProblem;
pub use model::{AuxSign, Model, ModelBuilder};
pub use problem::{AuxVariable, Constraint, ConstraintOp, DecisionVariable, ProblemSpec, Sense};
pub use report::{OBJECTIVE_LABEL, ReportFile, ReportRow};
pub use solver::{SolveResult, SolveStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fs::{read_dir, read_to_string};
    use std::path::Path;

    const TOLERANCE: f64 = 1e-6;

    #[derive(Debug, Deserialize)]
    struct Expected {
        status: SolveStatus,
        objective: Option<f64>,
        #[serde(default)]
        values: BTreeMap<String, f64>,
        #[serde(default)]
        aux_sign: AuxSign,
    }

    #[derive(Debug, Deserialize)]
    struct ExpectedFile {
        expected: Expected,
    }

    // Helper function to run a test from a test file
    fn run_test_file(test_file: &Path) {
        println!("Running test for file: {:?}", test_file);

        let failure_message = format!("Failed to read test file: {}", test_file.display());
        let yaml_content = read_to_string(test_file).expect(&failure_message);

        // Split the file content at the "expected:" marker to separate input and expected output
        let parts: Vec<&str> = yaml_content.split("expected:").collect();

        let failure_message = format!("Failed to parse input YAML: {}", test_file.display());
        let input_yaml = parts.first().expect("No input found in test file").trim();
        let spec: ProblemSpec = serde_yaml::from_str(input_yaml).expect(&failure_message);

        let failure_message = format!("Failed to parse expected YAML: {}", test_file.display());
        let expected_yaml = format!("expected:{}", parts.get(1).expect(&failure_message));
        let expected = serde_yaml::from_str::<ExpectedFile>(&expected_yaml)
            .expect(&failure_message)
            .expected;

        let failure_message = format!("Failed to build model: {}", test_file.display());
        let builder = ModelBuilder::new(expected.aux_sign);
        let model = builder.build(&spec).expect(&failure_message);
        assert_eq!(
            model.variable_count(),
            spec.variables.len() + spec.auxiliary.len(),
            "{}",
            test_file.display()
        );
        let result = solver::solve(model);
        println!("received: {:?}", result);

        assert_eq!(expected.status, result.status, "{}", test_file.display());

        match (expected.objective, result.objective) {
            (Some(want), Some(got)) => assert!(
                (want - got).abs() < TOLERANCE,
                "{}: objective {got} != {want}",
                test_file.display()
            ),
            (None, None) => {}
            (want, got) => panic!("{}: objective {got:?} != {want:?}", test_file.display()),
        }

        for (name, want) in &expected.values {
            let got = result.value(name).unwrap_or(f64::NAN);
            assert!(
                (want - got).abs() < TOLERANCE,
                "{}: {name} = {got} != {want}",
                test_file.display()
            );
        }

        for (i, demand) in spec.demand_equalities() {
            let x = result.value(&spec.variables[i].name).unwrap_or(f64::NAN);
            let s = result.value(&spec.auxiliary[i].name).unwrap_or(f64::NAN);
            assert!(
                (x + s - demand).abs() < TOLERANCE,
                "{}: demand {demand} not met",
                test_file.display()
            );
        }

        // Solving the same input again must give the same answer
        let again = solver::solve(builder.build(&spec).expect(&failure_message));
        assert_eq!(result, again, "{}", test_file.display());
    }

    #[test]
    fn run_all_test_files() {
        let _ = env_logger::builder().is_test(true).try_init();

        // Read all files from the test_data directory
        let test_data_dir = Path::new("test_data");
        let mut entries: Vec<_> = read_dir(test_data_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|path| {
                path.is_file() && path.extension().map(|ext| ext == "yaml").unwrap_or(false)
            })
            .collect();

        // Sort paths lexically by filename
        entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        for path in entries {
            run_test_file(&path);
        }
    }
}
