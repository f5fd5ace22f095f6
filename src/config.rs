use std::path::PathBuf;

use crate::model::AuxSign;

pub const DEFAULT_REPORT_PATH: &str = "solver_report.yaml";

/// Settings shared by every solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the report is written; overwritten on every successful solve.
    pub report_path: PathBuf,
    pub aux_sign: AuxSign,
    /// Print a bar chart after solving.
    pub chart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            aux_sign: AuxSign::default(),
            chart: true,
        }
    }
}

impl Config {
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn with_aux_sign(mut self, aux_sign: AuxSign) -> Self {
        self.aux_sign = aux_sign;
        self
    }

    pub fn with_chart(mut self, chart: bool) -> Self {
        self.chart = chart;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let config = Config::default();
        assert_eq!(config.report_path, PathBuf::from(DEFAULT_REPORT_PATH));
        assert_eq!(config.aux_sign, AuxSign::Subtract);
        assert!(config.chart);

        let config = config
            .with_report_path("out.yaml")
            .with_aux_sign(AuxSign::Add)
            .with_chart(false);
        assert_eq!(config.report_path, PathBuf::from("out.yaml"));
        assert_eq!(config.aux_sign, AuxSign::Add);
        assert!(!config.chart);
    }
}
