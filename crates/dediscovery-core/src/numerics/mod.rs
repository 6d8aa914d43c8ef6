use crate::domain::{AnalysisError, AnalysisResult};

/// Root-mean-square error between two index-aligned arrays.
pub fn rmse(predicted: &[f64], measured: &[f64]) -> AnalysisResult<f64> {
    if predicted.len() != measured.len() {
        return Err(AnalysisError::ShapeMismatch {
            predicted: predicted.len(),
            measured: measured.len(),
        });
    }
    if predicted.is_empty() {
        return Err(AnalysisError::EmptyArray {
            what: "root-mean-square error".to_string(),
        });
    }

    let mut sum = 0.0;
    let mut correction = 0.0;
    for (p, m) in predicted.iter().zip(measured) {
        let diff = p - m;
        kahan_add(&mut sum, &mut correction, diff * diff);
    }
    Ok((sum / predicted.len() as f64).sqrt())
}

/// Shortest round-trip text of `value` in the form Python's `repr` uses.
///
/// Artifact names and CSV cells in existing result trees use this
/// form, so `0.1` stays `0.1`, `1.0` keeps its fraction and small values use
/// a signed two-digit exponent (`1e-05`).
pub fn format_python_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    pad_exponent(format!("{value:?}"))
}

/// `numpy.savetxt` default cell format (`%.18e`).
pub fn format_savetxt(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    pad_exponent(format!("{value:.18e}"))
}

fn pad_exponent(text: String) -> String {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    *correction = (next - *sum) - corrected;
    *sum = next;
}

#[cfg(test)]
mod tests {
    use super::{format_python_float, format_savetxt, rmse};
    use crate::domain::AnalysisError;

    #[test]
    fn rmse_matches_hand_computed_value() {
        let value = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).expect("rmse should compute");
        assert!((value - (4.0_f64 / 3.0).sqrt()).abs() < 1.0e-12);
        assert_eq!(rmse(&[0.5], &[0.5]).expect("rmse"), 0.0);
    }

    #[test]
    fn rmse_rejects_mismatched_or_empty_arrays() {
        assert!(matches!(
            rmse(&[1.0, 2.0], &[1.0]),
            Err(AnalysisError::ShapeMismatch {
                predicted: 2,
                measured: 1
            })
        ));
        assert!(matches!(
            rmse(&[], &[]),
            Err(AnalysisError::EmptyArray { .. })
        ));
    }

    #[test]
    fn python_float_text_matches_repr() {
        assert_eq!(format_python_float(0.1), "0.1");
        assert_eq!(format_python_float(1.0), "1.0");
        assert_eq!(format_python_float(0.0), "0.0");
        assert_eq!(format_python_float(-2.5), "-2.5");
        assert_eq!(format_python_float(1.0e-5), "1e-05");
        assert_eq!(format_python_float(2.5e-7), "2.5e-07");
        assert_eq!(format_python_float(1.0e16), "1e+16");
        assert_eq!(format_python_float(0.0001), "0.0001");
        assert_eq!(format_python_float(f64::NAN), "nan");
    }

    #[test]
    fn savetxt_text_matches_numpy_default() {
        assert_eq!(format_savetxt(0.1), "1.000000000000000056e-01");
        assert_eq!(format_savetxt(-1.0), "-1.000000000000000000e+00");
        assert_eq!(format_savetxt(0.0), "0.000000000000000000e+00");
        assert_eq!(format_savetxt(12345.0), "1.234500000000000000e+04");
    }
}
