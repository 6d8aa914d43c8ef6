use super::TermCoefficientMap;
use crate::domain::{AnalysisError, AnalysisResult};

pub const CONSTANT_LABEL: &str = "C";

/// Folds normalized terms into label -> coefficient.
///
/// Zero coefficients are dropped. A repeated label overwrites the earlier
/// coefficient instead of adding to it.
pub fn extract_coefficients<S: AsRef<str>>(terms: &[S]) -> AnalysisResult<TermCoefficientMap> {
    let mut coefficients = TermCoefficientMap::new();
    for term in terms {
        let term = term.as_ref();
        let mut fields = term.split('*');
        let leading = fields.next().unwrap_or_default();
        let coefficient = leading
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| AnalysisError::CoefficientParse {
                term: term.to_string(),
                field: leading.to_string(),
            })?;
        if coefficient == 0.0 {
            continue;
        }

        let factors: Vec<&str> = fields.collect();
        let label = if factors.is_empty() {
            CONSTANT_LABEL.to_string()
        } else {
            factors.join("*")
        };
        coefficients.insert(label, coefficient);
    }
    Ok(coefficients)
}
