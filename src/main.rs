use clap::{Args, Parser, Subcommand};
use std::fs::read_to_string;
use std::io::{self, Write};
use std::path::PathBuf;

use lpreport::config::DEFAULT_REPORT_PATH;
use lpreport::report::{objective_of, render_chart, render_table};
use lpreport::{AuxSign, Config, Error, ProblemSpec, RawProblem, workflow};

#[derive(Parser)]
#[command(name = "lpreport")]
#[command(about = "Build a linear program from coefficients, solve it, and report the result", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Options {
    /// Report file, overwritten after every successful solve
    #[arg(long, global = true, default_value = DEFAULT_REPORT_PATH)]
    report: PathBuf,
    /// Whether auxiliary variables are subtracted from or added to the objective
    #[arg(long, global = true, value_enum, default_value_t = AuxSign::Subtract)]
    aux_sign: AuxSign,
    /// Do not print the bar chart
    #[arg(long, global = true)]
    no_chart: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a problem described in a YAML file
    Solve {
        /// The problem file
        file: PathBuf,
    },
    /// Solve a problem given as command-line fields
    Inline {
        /// max or min
        #[arg(long)]
        sense: String,
        /// Objective coefficients of x1, x2, ...
        #[arg(long, num_args = 1.., allow_negative_numbers = true, required = true)]
        objective: Vec<String>,
        /// A constraint such as "1 1 <= 4" (repeatable)
        #[arg(long, allow_hyphen_values = true)]
        constraint: Vec<String>,
        /// An auxiliary variable as "coefficient" or "coefficient:demand" (repeatable)
        #[arg(long, allow_hyphen_values = true)]
        aux: Vec<String>,
    },
    /// Show the last saved report
    Report,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = Config::default()
        .with_report_path(cli.options.report)
        .with_aux_sign(cli.options.aux_sign)
        .with_chart(!cli.options.no_chart);

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &Config) -> Result<(), Error> {
    match command {
        Commands::Solve { file } => {
            let buf = read_to_string(&file).map_err(|e| Error::Io {
                path: file.clone(),
                source: e,
            })?;
            let spec: ProblemSpec = serde_yaml::from_str(&buf)?;
            solve(&spec, config)
        }
        Commands::Inline {
            sense,
            objective,
            constraint,
            aux,
        } => {
            let raw = RawProblem {
                sense,
                objective,
                constraints: constraint,
                auxiliary: aux,
            };
            solve(&raw.parse()?, config)
        }
        Commands::Report => {
            let rows = workflow::show_last(config)?;
            let mut out = io::stdout().lock();
            writeln!(out, "Last saved report ({}):", config.report_path.display()).map_err(stdout_error)?;
            render_table(&rows, &mut out).map_err(stdout_error)?;
            if let Some(objective) = objective_of(&rows) {
                writeln!(out, "\nOptimal value: {objective}").map_err(stdout_error)?;
            }
            Ok(())
        }
    }
}

fn solve(spec: &ProblemSpec, config: &Config) -> Result<(), Error> {
    let outcome = workflow::run(spec, config)?;

    let mut out = io::stdout().lock();
    let mut print = || -> io::Result<()> {
        writeln!(out, "Status: {}", outcome.result.status)?;
        if let Some(objective) = outcome.result.objective {
            writeln!(out, "Optimal value: {objective}")?;
        }
        writeln!(out)?;
        render_table(&outcome.rows, &mut out)?;
        if config.chart {
            writeln!(out)?;
            render_chart(&outcome.rows, &mut out)?;
        }
        writeln!(out, "\nReport saved to {}", config.report_path.display())
    };
    print().map_err(stdout_error)
}

fn stdout_error(source: io::Error) -> Error {
    Error::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}
