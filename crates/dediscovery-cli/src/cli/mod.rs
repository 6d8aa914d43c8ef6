mod commands;
mod helpers;

use clap::Parser;
use dediscovery_core::AnalysisError;
use tracing_subscriber::filter::LevelFilter;

const PROGRAM_NAME: &str = "dediscovery";

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{}", error.diagnostic_line());
            eprintln!("{}", error.fatal_exit_line());
            error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once(PROGRAM_NAME.to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            init_tracing(cli.verbose);
            dispatch_parsed(cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

/// Installs the stderr subscriber once per process; later calls are no-ops.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "dediscovery",
    about = "Aggregate differential-equation discovery results"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Fold a results tree into total_results_<experiment>.csv and .md
    Aggregate(commands::AggregateArgs),
    /// Split raw measurements into training and test series
    Split(commands::SplitArgs),
    /// Parse one equation file and print its coefficients
    Parse(commands::ParseArgs),
}

fn dispatch_parsed(command: CliCommand) -> Result<i32, CliError> {
    match command {
        CliCommand::Aggregate(args) => commands::run_aggregate_command(args),
        CliCommand::Split(args) => commands::run_split_command(args),
        CliCommand::Parse(args) => commands::run_parse_command(args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Analysis(AnalysisError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 2,
            Self::Analysis(error) => error.exit_code(),
            Self::Internal(_) => 3,
        }
    }

    pub fn diagnostic_line(&self) -> String {
        match self {
            Self::Usage(message) => format!("ERROR: [INPUT.CLI_USAGE] {}", message.trim_end()),
            Self::Analysis(error) => error.diagnostic_line(),
            Self::Internal(error) => format!("ERROR: [IO.CLI] {error:#}"),
        }
    }

    pub fn fatal_exit_line(&self) -> String {
        format!("FATAL EXIT CODE: {}", self.exit_code())
    }
}

#[cfg(test)]
mod tests {
    use super::{CliError, run};
    use dediscovery_core::AnalysisError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unknown_flags_are_usage_errors() {
        let error = run(["aggregate", "--bogus"]).expect_err("parse should fail");
        assert!(matches!(error, CliError::Usage(_)));
        assert_eq!(error.exit_code(), 2);
        assert!(error.diagnostic_line().starts_with("ERROR: [INPUT.CLI_USAGE]"));
        assert_eq!(error.fatal_exit_line(), "FATAL EXIT CODE: 2");
    }

    #[test]
    fn help_exits_cleanly() {
        assert_eq!(run(["--help"]).expect("help should succeed"), 0);
    }

    #[test]
    fn analysis_errors_keep_their_exit_code() {
        let error = CliError::Analysis(AnalysisError::ShapeMismatch {
            predicted: 2,
            measured: 3,
        });
        assert_eq!(error.exit_code(), 4);
        assert!(error.diagnostic_line().starts_with("ERROR: [RUN.SHAPE_MISMATCH]"));
    }

    #[test]
    fn parse_command_runs_in_process() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("eqn_0.1_0_0.txt");
        fs::write(&path, "1.0*x0 = dI/dx0\n").expect("equation should be written");

        let path = path.to_string_lossy().into_owned();
        assert_eq!(run(["parse", path.as_str()]).expect("parse should succeed"), 0);
    }
}
