pub mod aggregate;
pub mod equation;
pub mod layout;
pub mod pipeline;
pub mod report;
pub mod run_key;
pub mod split;

mod serialization;
mod traits;

pub use aggregate::{
    AggregationRequest, ResultRow, ResultsTable, aggregate, summarize_experiment,
    write_results_csv,
};
pub use equation::{
    CONSTANT_LABEL, TermCoefficientMap, extract_coefficients, parse_equation, parse_terms,
};
pub use layout::{ExperimentPaths, Partition, RawMeasurementPaths};
pub use pipeline::{ExperimentRunner, Measurements};
pub use report::{render_report, write_report};
pub use run_key::{equation_file_name, parse_prefixed_run_key, parse_run_key};
pub use serialization::{normalize_text_artifact, write_text_artifact};
pub use split::{SplitData, save_split, split_measurements};
pub use traits::{DiscoveredEquation, DiscoveryEngine, PdeSolver, SolverPrediction};
