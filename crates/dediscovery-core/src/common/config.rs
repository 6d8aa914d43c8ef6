//! Experiment configuration.
//!
//! Every struct deserializes from JSON with all fields optional; missing
//! fields take the values the optics sweeps were run with.

use crate::domain::{AnalysisError, AnalysisResult, ParamValue};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Textual conventions of the discovery engine output and of the report.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EquationNotation {
    /// Marker the engine appends to factors raised to the first power.
    pub unit_power_marker: String,
    /// Engine tokens naming the independent coordinate, replaced in order.
    pub coordinate_aliases: Vec<String>,
    /// Symbol substituted for every coordinate alias.
    pub coordinate_symbol: String,
    /// Label of the right-hand-side term once parsed.
    pub target_label: String,
    /// LaTeX substituted for the target label in reports.
    pub target_display: String,
    pub param_symbol: String,
}

impl Default for EquationNotation {
    fn default() -> Self {
        Self {
            unit_power_marker: "{power:1.0}".to_string(),
            coordinate_aliases: vec!["x0".to_string(), "t{power:1.0,dim:0.0}".to_string()],
            coordinate_symbol: "H".to_string(),
            target_label: "dI/dH".to_string(),
            target_display: r"\frac{dI}{dH}".to_string(),
            param_symbol: "$r_0$".to_string(),
        }
    }
}

/// Directory and file naming inside one `results_<experiment>` tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResultsLayout {
    pub split_dir: String,
    pub equations_dir: String,
    pub solutions_dir: String,
    pub grid_stem: String,
    pub measurement_stem: String,
    pub equation_prefix: String,
    pub solution_prefix: String,
}

impl Default for ResultsLayout {
    fn default() -> Self {
        Self {
            split_dir: "split exp data".to_string(),
            equations_dir: "text equations".to_string(),
            solutions_dir: "solutions data".to_string(),
            grid_stem: "grid".to_string(),
            measurement_stem: "poynting_vec".to_string(),
            equation_prefix: "eqn".to_string(),
            solution_prefix: "sln_data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplitConfig {
    pub test_size: f64,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 0,
        }
    }
}

/// Search hyperparameters forwarded untouched to the discovery engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscoveryParams {
    pub population_size: usize,
    pub factors_max_number: usize,
    pub poly_order: usize,
    pub max_deriv_order: Vec<usize>,
    pub equation_terms_max_number: usize,
    pub data_fun_pow: usize,
    pub training_epochs: usize,
    pub variable_names: Vec<String>,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            population_size: 5,
            factors_max_number: 1,
            poly_order: 4,
            max_deriv_order: vec![2],
            equation_terms_max_number: 5,
            data_fun_pow: 1,
            training_epochs: 100,
            variable_names: vec!["I".to_string()],
        }
    }
}

/// Settings forwarded to the PDE solver.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverParams {
    pub training_epochs: usize,
    /// Coordinate of the Dirichlet condition.
    pub boundary_point: f64,
    pub boundary_value: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            training_epochs: 10_000,
            boundary_point: 0.0,
            boundary_value: -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Directory that holds `results_<experiment_name>`.
    pub results_root: PathBuf,
    /// Directory that holds the raw `T(H) r0=<param>` measurement folders.
    pub data_root: PathBuf,
    pub experiment_name: String,
    pub param_values: Vec<ParamValue>,
    pub run_count: usize,
    pub wave_length: f64,
    pub solve_equations: bool,
    pub notation: EquationNotation,
    pub layout: ResultsLayout,
    pub split: SplitConfig,
    pub discovery: DiscoveryParams,
    pub solver: SolverParams,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("results"),
            data_root: PathBuf::from("data"),
            experiment_name: "optics".to_string(),
            param_values: (1..10)
                .map(|r| ParamValue::Float(r as f64 / 10.0))
                .chain(std::iter::once(ParamValue::Int(1)))
                .collect(),
            run_count: 1,
            wave_length: 0.5,
            solve_equations: true,
            notation: EquationNotation::default(),
            layout: ResultsLayout::default(),
            split: SplitConfig::default(),
            discovery: DiscoveryParams::default(),
            solver: SolverParams::default(),
        }
    }
}

impl ExperimentConfig {
    pub fn from_path(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| AnalysisError::io(path, source))?;
        serde_json::from_str(&source).map_err(|source| AnalysisError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Population size is shared by the search and the aggregation sweep.
    pub fn population_size(&self) -> usize {
        self.discovery.population_size
    }

    pub fn results_dir(&self) -> PathBuf {
        results_dir_for(&self.results_root, &self.experiment_name)
    }
}

pub fn results_dir_for(results_root: &Path, experiment_name: &str) -> PathBuf {
    results_root.join(format!("results_{experiment_name}"))
}
