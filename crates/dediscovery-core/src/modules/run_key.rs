use crate::domain::{AnalysisError, AnalysisResult, ParamValue, RunKey};

const EQUATION_PREFIX: &str = "eqn";
const TEXT_SUFFIX: &str = ".txt";

/// Recovers the run identity from an equation artifact name such as
/// `eqn_0.3_2_0.txt`.
///
/// The prefix field is not checked; only its presence matters.
pub fn parse_run_key(file_name: &str) -> AnalysisResult<RunKey> {
    let fields: Vec<&str> = file_name.split('_').collect();
    let [_prefix, param, index, run] = fields.as_slice() else {
        return Err(AnalysisError::invalid_run_key(
            file_name,
            format!("expected 4 '_'-separated fields, found {}", fields.len()),
        ));
    };
    parse_key_fields(file_name, param, index, run)
}

/// Like [`parse_run_key`] for artifacts named `<prefix>_<param>_<index>_<run>.txt`
/// where `prefix` may itself contain `_`.
pub fn parse_prefixed_run_key(file_name: &str, prefix: &str) -> AnalysisResult<RunKey> {
    let suffix = file_name
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .ok_or_else(|| {
            AnalysisError::invalid_run_key(file_name, format!("expected prefix '{prefix}_'"))
        })?;
    let fields: Vec<&str> = suffix.split('_').collect();
    let [param, index, run] = fields.as_slice() else {
        return Err(AnalysisError::invalid_run_key(
            file_name,
            format!(
                "expected 3 '_'-separated fields after '{prefix}_', found {}",
                fields.len()
            ),
        ));
    };
    parse_key_fields(file_name, param, index, run)
}

fn parse_key_fields(file_name: &str, param: &str, index: &str, run: &str) -> AnalysisResult<RunKey> {
    let param = param
        .parse::<ParamValue>()
        .map_err(|reason| AnalysisError::invalid_run_key(file_name, reason))?;
    let index = parse_counter(file_name, "index", index)?;
    let run = run.strip_suffix(TEXT_SUFFIX).ok_or_else(|| {
        AnalysisError::invalid_run_key(file_name, format!("missing '{TEXT_SUFFIX}' suffix"))
    })?;
    let run = parse_counter(file_name, "run", run)?;

    Ok(RunKey { param, index, run })
}

/// Inverse of [`parse_run_key`] for the default `eqn` prefix.
pub fn equation_file_name(key: &RunKey) -> String {
    prefixed_file_name(EQUATION_PREFIX, key)
}

pub(crate) fn prefixed_file_name(prefix: &str, key: &RunKey) -> String {
    format!("{prefix}_{}{TEXT_SUFFIX}", key.suffix())
}

fn parse_counter(file_name: &str, what: &str, raw: &str) -> AnalysisResult<usize> {
    raw.parse::<usize>().map_err(|_| {
        AnalysisError::invalid_run_key(
            file_name,
            format!("{what} '{raw}' is not a non-negative integer"),
        )
    })
}
