use super::CliError;
use super::helpers::*;
use dediscovery_core::ParamValue;
use dediscovery_core::common::ExperimentConfig;
use dediscovery_core::modules::{
    AggregationRequest, ExperimentPaths, Measurements, aggregate, extract_coefficients,
    parse_run_key, parse_terms, render_report, save_split, split_measurements, write_report,
    write_results_csv,
};
use dediscovery_core::numerics::format_python_float;
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct ExperimentArgs {
    /// Experiment configuration JSON; explicit flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding results_<experiment>
    #[arg(long)]
    results_root: Option<PathBuf>,

    /// Experiment name
    #[arg(long)]
    experiment: Option<String>,

    /// Comma-separated parameter values, e.g. 0.1,0.2
    #[arg(long, value_delimiter = ',')]
    params: Option<Vec<ParamValue>>,
}

impl ExperimentArgs {
    fn into_config(self) -> Result<ExperimentConfig, CliError> {
        let mut config = load_experiment_config(self.config.as_deref())?;
        if let Some(results_root) = self.results_root {
            config.results_root = results_root;
        }
        if let Some(experiment) = self.experiment {
            config.experiment_name = experiment;
        }
        if let Some(params) = self.params {
            config.param_values = params;
        }
        Ok(config)
    }
}

#[derive(clap::Args)]
pub(super) struct AggregateArgs {
    #[command(flatten)]
    experiment: ExperimentArgs,

    /// Equations per discovered population
    #[arg(long)]
    population_size: Option<usize>,

    /// Discovery runs per parameter value
    #[arg(long)]
    runs: Option<usize>,

    /// Skip writing total_results_<experiment>.csv
    #[arg(long)]
    no_csv: bool,

    /// Skip writing total_results_<experiment>.md
    #[arg(long)]
    no_report: bool,

    /// Print the aggregated table as JSON
    #[arg(long)]
    json: bool,
}

impl AggregateArgs {
    fn into_config(self) -> Result<ExperimentConfig, CliError> {
        let mut config = self.experiment.into_config()?;
        if let Some(population_size) = self.population_size {
            config.discovery.population_size = population_size;
        }
        if let Some(runs) = self.runs {
            config.run_count = runs;
        }
        Ok(config)
    }
}

#[derive(clap::Args)]
pub(super) struct SplitArgs {
    #[command(flatten)]
    experiment: ExperimentArgs,

    /// Directory holding the raw `T(H) r0=<param>` folders
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Fraction of samples held out for testing
    #[arg(long)]
    test_size: Option<f64>,

    /// Shuffle seed
    #[arg(long)]
    seed: Option<u64>,
}

impl SplitArgs {
    fn into_config(self) -> Result<ExperimentConfig, CliError> {
        let mut config = self.experiment.into_config()?;
        if let Some(data_root) = self.data_root {
            config.data_root = data_root;
        }
        if let Some(test_size) = self.test_size {
            config.split.test_size = test_size;
        }
        if let Some(seed) = self.seed {
            config.split.seed = seed;
        }
        Ok(config)
    }
}

#[derive(clap::Args)]
pub(super) struct ParseArgs {
    /// Equation text file; only the first line is read
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Symbol substituted for the coordinate aliases
    #[arg(long)]
    symbol: Option<String>,

    /// Experiment configuration JSON supplying the notation
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print terms and coefficients as JSON
    #[arg(long)]
    json: bool,
}

pub(super) fn run_aggregate_command(args: AggregateArgs) -> Result<i32, CliError> {
    let (no_csv, no_report, json) = (args.no_csv, args.no_report, args.json);
    let config = args.into_config()?;
    let request = AggregationRequest::from_config(&config);
    let paths = request.paths();

    let table = aggregate(&request).map_err(CliError::Analysis)?;
    if !no_csv {
        let path = paths.total_results_csv();
        write_results_csv(&table, &path).map_err(CliError::Analysis)?;
        println!("Results table: {}", path.display());
    }
    if !no_report {
        let path = paths.total_results_md();
        let lines = render_report(&table, &request.notation);
        write_report(&lines, &path).map_err(CliError::Analysis)?;
        println!("Equation report: {}", path.display());
    }

    if json {
        println!("{}", render_json(&table, "results table")?);
    } else {
        println!(
            "Aggregated {} row(s) with {} term column(s) from {}",
            table.len(),
            table.term_labels().count(),
            paths.root().display()
        );
    }
    Ok(0)
}

pub(super) fn run_split_command(args: SplitArgs) -> Result<i32, CliError> {
    let config = args.into_config()?;
    let paths = ExperimentPaths::new(config.results_dir(), config.layout.clone());

    for &param in &config.param_values {
        let measurements =
            Measurements::load(&config.data_root, param).map_err(CliError::Analysis)?;
        let split = split_measurements(&measurements.grid, &measurements.values, &config.split)
            .map_err(CliError::Analysis)?;
        save_split(&paths, param, &split).map_err(CliError::Analysis)?;
        println!(
            "r0={param}: {} training / {} test samples",
            split.training_grid.len(),
            split.test_grid.len()
        );
    }
    info!(root = %paths.split_dir().display(), "split data written");
    Ok(0)
}

pub(super) fn run_parse_command(args: ParseArgs) -> Result<i32, CliError> {
    let mut notation = load_experiment_config(args.config.as_deref())?.notation;
    if let Some(symbol) = args.symbol {
        notation.coordinate_symbol = symbol;
    }

    let line = read_equation_file(&args.file)?;
    let terms = parse_terms(&line, &notation).map_err(CliError::Analysis)?;
    let coefficients = extract_coefficients(&terms).map_err(CliError::Analysis)?;

    let run_key = args
        .file
        .file_name()
        .and_then(|name| parse_run_key(&name.to_string_lossy()).ok());

    if args.json {
        let document = serde_json::json!({
            "terms": terms,
            "coefficients": coefficients,
            "run": run_key.map(|key| serde_json::json!({
                "param": key.param,
                "index": key.index,
                "run": key.run,
            })),
        });
        println!("{}", render_json(&document, "parsed equation")?);
        return Ok(0);
    }

    if let Some(key) = run_key {
        println!("run: {key}");
    }
    println!("terms: {}", terms.join(", "));
    for (label, coefficient) in coefficients.iter() {
        println!("{label} = {}", format_python_float(coefficient));
    }
    Ok(0)
}
