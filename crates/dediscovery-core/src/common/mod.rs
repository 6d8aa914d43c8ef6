pub mod config;

pub use config::{
    DiscoveryParams, EquationNotation, ExperimentConfig, ResultsLayout, SolverParams, SplitConfig,
    results_dir_for,
};
