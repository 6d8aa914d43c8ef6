use crate::domain::{AnalysisError, AnalysisResult};
use std::fs;
use std::path::Path;

pub fn normalize_text_artifact(content: &str) -> String {
    let mut normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.is_empty() && !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}

/// Writes a text artifact with canonical line endings, creating parent
/// directories as needed.
pub fn write_text_artifact(path: &Path, content: &str) -> AnalysisResult<()> {
    ensure_parent_dir(path)?;
    fs::write(path, normalize_text_artifact(content)).map_err(|source| AnalysisError::io(path, source))
}

pub(crate) fn write_verbatim_artifact(path: &Path, content: &str) -> AnalysisResult<()> {
    ensure_parent_dir(path)?;
    fs::write(path, content).map_err(|source| AnalysisError::io(path, source))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> AnalysisResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| AnalysisError::io(parent, source))
        }
        _ => Ok(()),
    }
}
