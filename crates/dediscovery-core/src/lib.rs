//! Result parsing, aggregation and archiving for differential-equation
//! discovery experiments on optical intensity measurements.
//!
//! The equation search and the neural PDE solver are external engines; this
//! crate reads and writes the artifacts they exchange, and folds a whole
//! parameter sweep into one table and one report.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;

pub use domain::{AnalysisError, AnalysisResult, ErrorCategory, ParamValue, RunKey};
