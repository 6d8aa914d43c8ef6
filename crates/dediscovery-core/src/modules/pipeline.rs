//! Drives discovery and solving over a parameter sweep and leaves behind the
//! results tree that [`crate::modules::aggregate`] reads.

use crate::common::ExperimentConfig;
use crate::domain::{AnalysisError, AnalysisResult, ParamValue, RunKey};
use crate::modules::aggregate::{AggregationRequest, ResultsTable, summarize_experiment};
use crate::modules::layout::{
    ExperimentPaths, Partition, RawMeasurementPaths, read_numeric_array, write_equation_text,
    write_numeric_array,
};
use crate::modules::split::{save_split, split_measurements};
use crate::modules::traits::{DiscoveryEngine, PdeSolver};
use std::path::Path;
use tracing::{info, warn};

/// Raw coordinate/value series for one parameter value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurements {
    pub grid: Vec<f64>,
    pub values: Vec<f64>,
}

impl Measurements {
    pub fn load(data_root: &Path, param: ParamValue) -> AnalysisResult<Self> {
        let paths = RawMeasurementPaths::new(data_root, param);
        Ok(Self {
            grid: read_numeric_array(&paths.grid)?,
            values: read_numeric_array(&paths.values)?,
        })
    }
}

pub struct ExperimentRunner<D, S> {
    config: ExperimentConfig,
    paths: ExperimentPaths,
    engine: D,
    solver: S,
}

impl<D, S> ExperimentRunner<D, S>
where
    D: DiscoveryEngine,
    S: PdeSolver<D::SolverForm>,
{
    pub fn new(config: ExperimentConfig, engine: D, solver: S) -> Self {
        let paths = ExperimentPaths::new(config.results_dir(), config.layout.clone());
        Self {
            config,
            paths,
            engine,
            solver,
        }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    pub fn paths(&self) -> &ExperimentPaths {
        &self.paths
    }

    /// Splits, discovers and solves for one parameter value. Returns the
    /// number of equations saved across all runs.
    pub fn run_param(&self, param: ParamValue, measurements: &Measurements) -> AnalysisResult<usize> {
        if !(self.config.wave_length.is_finite() && self.config.wave_length > 0.0) {
            return Err(AnalysisError::invalid_setting(
                "wave_length",
                format!("must be positive and finite, got {}", self.config.wave_length),
            ));
        }
        let split = split_measurements(&measurements.grid, &measurements.values, &self.config.split)?;
        save_split(&self.paths, param, &split)?;

        let training_grid = scale(&split.training_grid, self.config.wave_length);
        let test_grid = scale(&split.test_grid, self.config.wave_length);

        let mut saved = 0;
        for run in 0..self.config.run_count {
            let equations = self.engine.discover(
                &training_grid,
                &split.training_values,
                &self.config.discovery,
            )?;
            if equations.is_empty() {
                warn!(%param, run, "discovery returned an empty population");
            }

            for (index, equation) in equations.iter().enumerate() {
                let key = RunKey { param, index, run };
                if self.config.solve_equations {
                    let prediction = self.solver.solve(
                        &equation.solver_form,
                        &training_grid,
                        &test_grid,
                        &self.config.solver,
                    )?;
                    write_numeric_array(&self.paths.solution(&key, Partition::Training), &prediction.training)?;
                    write_numeric_array(&self.paths.solution(&key, Partition::Test), &prediction.test)?;
                }
                write_equation_text(&self.paths.equation(&key), &equation.text)?;
                saved += 1;
            }
            info!(%param, run, equations = equations.len(), "finished discovery run");
        }
        Ok(saved)
    }

    /// Runs every configured parameter value, then writes the summary table
    /// and report.
    pub fn run_sweep(&self) -> AnalysisResult<ResultsTable> {
        for &param in &self.config.param_values {
            let measurements = Measurements::load(&self.config.data_root, param)?;
            self.run_param(param, &measurements)?;
        }
        summarize_experiment(&AggregationRequest::from_config(&self.config))
    }
}

fn scale(grid: &[f64], wave_length: f64) -> Vec<f64> {
    grid.iter().map(|x| x / wave_length).collect()
}
