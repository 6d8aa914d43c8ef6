//! On-disk layout of one experiment's results tree and the readers and
//! writers for the artifacts stored in it.

use super::run_key::prefixed_file_name;
use super::serialization::{ensure_parent_dir, write_verbatim_artifact};
use crate::common::{ResultsLayout, results_dir_for};
use crate::domain::{AnalysisError, AnalysisResult, ParamValue, RunKey};
use crate::numerics::format_savetxt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const RESULTS_DIR_PREFIX: &str = "results_";
const TOTAL_RESULTS_STEM: &str = "total_results";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Training,
    Test,
}

impl Partition {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Training => "training",
            Self::Test => "test",
        }
    }
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path builder rooted at `results_<experiment>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentPaths {
    root: PathBuf,
    layout: ResultsLayout,
}

impl ExperimentPaths {
    pub fn new(root: impl Into<PathBuf>, layout: ResultsLayout) -> Self {
        Self {
            root: root.into(),
            layout,
        }
    }

    pub fn for_experiment(results_root: &Path, experiment_name: &str, layout: ResultsLayout) -> Self {
        Self::new(results_dir_for(results_root, experiment_name), layout)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn layout(&self) -> &ResultsLayout {
        &self.layout
    }

    /// Experiment name recovered from the root directory name.
    pub fn experiment_name(&self) -> String {
        let dir_name = self
            .root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match dir_name.strip_prefix(RESULTS_DIR_PREFIX) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => dir_name,
        }
    }

    pub fn split_dir(&self) -> PathBuf {
        self.root.join(&self.layout.split_dir)
    }

    pub fn equations_dir(&self) -> PathBuf {
        self.root.join(&self.layout.equations_dir)
    }

    pub fn solutions_dir(&self) -> PathBuf {
        self.root.join(&self.layout.solutions_dir)
    }

    pub fn split_grid(&self, param: ParamValue, partition: Partition) -> PathBuf {
        self.split_dir()
            .join(format!("{}_{partition}_{param}.txt", self.layout.grid_stem))
    }

    pub fn split_measurement(&self, param: ParamValue, partition: Partition) -> PathBuf {
        self.split_dir()
            .join(format!("{}_{partition}_{param}.txt", self.layout.measurement_stem))
    }

    pub fn equation(&self, key: &RunKey) -> PathBuf {
        self.equations_dir()
            .join(prefixed_file_name(&self.layout.equation_prefix, key))
    }

    pub fn solution(&self, key: &RunKey, partition: Partition) -> PathBuf {
        let prefix = format!("{}_{partition}", self.layout.solution_prefix);
        self.solutions_dir().join(prefixed_file_name(&prefix, key))
    }

    pub fn total_results_csv(&self) -> PathBuf {
        self.total_results("csv")
    }

    pub fn total_results_md(&self) -> PathBuf {
        self.total_results("md")
    }

    fn total_results(&self, extension: &str) -> PathBuf {
        self.root.join(format!(
            "{TOTAL_RESULTS_STEM}_{}.{extension}",
            self.experiment_name()
        ))
    }
}

/// Raw measurement files for one parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMeasurementPaths {
    pub grid: PathBuf,
    pub values: PathBuf,
}

impl RawMeasurementPaths {
    pub fn new(data_root: &Path, param: ParamValue) -> Self {
        let dir = data_root.join(format!("T(H) r0={param}"));
        Self {
            grid: dir.join(format!("grid_{param}.txt")),
            values: dir.join(format!("T_av_{param}.txt")),
        }
    }
}

/// Reads a one-dimensional array from newline and/or comma separated text.
pub fn read_numeric_array(path: &Path) -> AnalysisResult<Vec<f64>> {
    let content = fs::read_to_string(path).map_err(|source| AnalysisError::io(path, source))?;
    parse_numeric_array(path, &content)
}

fn parse_numeric_array(path: &Path, content: &str) -> AnalysisResult<Vec<f64>> {
    let mut values = Vec::new();
    for (line_index, line) in content.lines().enumerate() {
        let tokens = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());
        for token in tokens {
            let value = token.parse::<f64>().map_err(|_| AnalysisError::NumericArray {
                path: path.to_path_buf(),
                line: line_index + 1,
                token: token.to_string(),
            })?;
            values.push(value);
        }
    }
    Ok(values)
}

/// Writes one value per line in `%.18e` form.
pub fn write_numeric_array(path: &Path, values: &[f64]) -> AnalysisResult<()> {
    ensure_parent_dir(path)?;
    let mut buffer = Vec::with_capacity(values.len() * 26);
    for value in values {
        writeln!(buffer, "{}", format_savetxt(*value))
            .map_err(|source| AnalysisError::io(path, source))?;
    }
    fs::write(path, buffer).map_err(|source| AnalysisError::io(path, source))
}

/// First line of an equation artifact, without its line terminator.
pub fn read_equation_line(path: &Path) -> AnalysisResult<String> {
    let content = fs::read_to_string(path).map_err(|source| AnalysisError::io(path, source))?;
    Ok(content.lines().next().unwrap_or_default().to_string())
}

pub fn write_equation_text(path: &Path, text: &str) -> AnalysisResult<()> {
    write_verbatim_artifact(path, text)
}
