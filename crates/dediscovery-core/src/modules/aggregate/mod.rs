mod table;

pub use table::{RMSE_COLUMN, ResultRow, ResultsTable};

use crate::common::{EquationNotation, ExperimentConfig, ResultsLayout};
use crate::domain::{AnalysisResult, ParamValue, RunKey};
use crate::modules::equation::parse_equation;
use crate::modules::layout::{ExperimentPaths, Partition, read_equation_line, read_numeric_array};
use crate::modules::report::{render_report, write_report};
use crate::modules::run_key::parse_prefixed_run_key;
use crate::modules::serialization::write_text_artifact;
use crate::numerics::rmse;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inputs of one aggregation sweep over a results tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationRequest {
    /// The `results_<experiment>` directory.
    pub experiment_root: PathBuf,
    pub param_values: Vec<ParamValue>,
    pub population_size: usize,
    pub run_count: usize,
    pub notation: EquationNotation,
    pub layout: ResultsLayout,
}

impl AggregationRequest {
    pub fn from_config(config: &ExperimentConfig) -> Self {
        Self {
            experiment_root: config.results_dir(),
            param_values: config.param_values.clone(),
            population_size: config.population_size(),
            run_count: config.run_count,
            notation: config.notation.clone(),
            layout: config.layout.clone(),
        }
    }

    pub fn paths(&self) -> ExperimentPaths {
        ExperimentPaths::new(&self.experiment_root, self.layout.clone())
    }
}

/// Collects every `(param, index, run)` attempt that left an equation, a
/// test-set prediction and the matching measurements on disk.
///
/// Attempts with any of those files missing are skipped. Files that exist
/// but cannot be parsed abort the sweep.
pub fn aggregate(request: &AggregationRequest) -> AnalysisResult<ResultsTable> {
    let paths = request.paths();
    let mut table = ResultsTable::new();

    for &param in &request.param_values {
        for index in 0..request.population_size {
            for run in 0..request.run_count {
                let key = RunKey { param, index, run };
                if let Some(row) = collect_row(&paths, &request.notation, &key)? {
                    table.push(row);
                }
            }
        }
    }

    info!(
        root = %paths.root().display(),
        rows = table.len(),
        columns = table.term_labels().count(),
        "aggregated discovery results"
    );
    Ok(table)
}

fn collect_row(
    paths: &ExperimentPaths,
    notation: &EquationNotation,
    key: &RunKey,
) -> AnalysisResult<Option<ResultRow>> {
    let equation_path = paths.equation(key);
    let Some(line) = skip_missing(read_equation_line(&equation_path), key)? else {
        return Ok(None);
    };
    let coefficients = parse_equation(&line, notation)?;

    let file_name = file_name_of(&equation_path);
    let key = parse_prefixed_run_key(&file_name, &paths.layout().equation_prefix)?;

    let Some(predicted) =
        skip_missing(read_numeric_array(&paths.solution(&key, Partition::Test)), &key)?
    else {
        return Ok(None);
    };
    let Some(measured) = skip_missing(
        read_numeric_array(&paths.split_measurement(key.param, Partition::Test)),
        &key,
    )?
    else {
        return Ok(None);
    };

    let rmse = rmse(&predicted, &measured)?;
    Ok(Some(ResultRow {
        file_name,
        key,
        coefficients,
        rmse,
    }))
}

fn skip_missing<T>(result: AnalysisResult<T>, key: &RunKey) -> AnalysisResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_skippable() => {
            debug!(%key, %error, "skipping attempt");
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn write_results_csv(table: &ResultsTable, path: &Path) -> AnalysisResult<()> {
    write_text_artifact(path, &table.to_csv())?;
    info!(path = %path.display(), rows = table.len(), "wrote results table");
    Ok(())
}

/// Aggregates once and writes `total_results_<experiment>.csv` and `.md`
/// into the experiment root.
pub fn summarize_experiment(request: &AggregationRequest) -> AnalysisResult<ResultsTable> {
    let table = aggregate(request)?;
    let paths = request.paths();
    write_results_csv(&table, &paths.total_results_csv())?;
    let lines = render_report(&table, &request.notation);
    write_report(&lines, &paths.total_results_md())?;
    Ok(table)
}
