pub mod errors;

pub use errors::{AnalysisError, AnalysisResult, ErrorCategory};

use crate::numerics::format_python_float;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Swept physical parameter (the inclusion radius `r0` in the optics runs).
///
/// Integer and float values are kept apart because they render differently in
/// artifact names: `1` and `1.0` address different files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl ParamValue {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_python_float(*value)),
        }
    }
}

impl FromStr for ParamValue {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.contains('.') {
            raw.parse::<f64>()
                .map(Self::Float)
                .map_err(|_| format!("'{raw}' is not a valid float parameter"))
        } else {
            raw.parse::<i64>()
                .map(Self::Int)
                .map_err(|_| format!("'{raw}' is not a valid integer parameter"))
        }
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// Identity of one discovery attempt: parameter value, position of the
/// equation in the returned population, and repeat index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunKey {
    pub param: ParamValue,
    pub index: usize,
    pub run: usize,
}

impl RunKey {
    pub fn new(param: impl Into<ParamValue>, index: usize, run: usize) -> Self {
        Self {
            param: param.into(),
            index,
            run,
        }
    }

    /// `<param>_<index>_<run>`, the suffix shared by every per-run artifact.
    pub fn suffix(&self) -> String {
        format!("{}_{}_{}", self.param, self.index, self.run)
    }
}

impl Display for RunKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "param={}, index={}, run={}",
            self.param, self.index, self.run
        )
    }
}
