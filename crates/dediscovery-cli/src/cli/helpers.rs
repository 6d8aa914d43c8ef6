use super::CliError;
use anyhow::Context;
use dediscovery_core::common::ExperimentConfig;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub(super) fn load_experiment_config(path: Option<&Path>) -> Result<ExperimentConfig, CliError> {
    match path {
        Some(path) => ExperimentConfig::from_path(path).map_err(CliError::Analysis),
        None => Ok(ExperimentConfig::default()),
    }
}

/// First line of a user-supplied equation file.
pub(super) fn read_equation_file(path: &Path) -> Result<String, CliError> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read equation file '{}'", path.display()))?;
    Ok(content.lines().next().unwrap_or_default().to_string())
}

pub(super) fn render_json<T: Serialize>(value: &T, what: &str) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {what} as JSON"))
        .map_err(CliError::from)
}
