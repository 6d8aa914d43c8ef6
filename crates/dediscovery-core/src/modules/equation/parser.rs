use crate::common::EquationNotation;
use crate::domain::{AnalysisError, AnalysisResult};

const TERM_SEPARATORS: [char; 2] = ['+', '='];

/// Splits one engine-native equation line into normalized term strings.
///
/// Substitutions are textual and run in a fixed order: whitespace removal,
/// unit-power marker removal, `=` to `=1.0*` so the target term carries an
/// explicit coefficient, then coordinate aliases to the display symbol.
/// The target term is always last.
pub fn parse_terms(line: &str, notation: &EquationNotation) -> AnalysisResult<Vec<String>> {
    match line.matches('=').count() {
        1 => {}
        0 => {
            return Err(AnalysisError::malformed_equation(
                line.trim_end(),
                "missing '=' between terms and target",
            ));
        }
        count => {
            return Err(AnalysisError::malformed_equation(
                line.trim_end(),
                format!("expected exactly one '=', found {count}"),
            ));
        }
    }

    let mut text: String = line
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r' | ' '))
        .collect();
    if !notation.unit_power_marker.is_empty() {
        text = text.replace(&notation.unit_power_marker, "");
    }
    text = text.replace('=', "=1.0*");
    for alias in &notation.coordinate_aliases {
        if !alias.is_empty() {
            text = text.replace(alias.as_str(), &notation.coordinate_symbol);
        }
    }

    Ok(text.split(TERM_SEPARATORS).map(str::to_owned).collect())
}

#[cfg(test)]
mod tests {
    use super::parse_terms;
    use crate::common::EquationNotation;
    use crate::domain::AnalysisError;

    #[test]
    fn terms_are_normalized_and_target_gets_unit_coefficient() {
        let notation = EquationNotation::default();
        let terms = parse_terms("1.0*C + 2.0*x0{power:1.0} + 1.0*x0 = dI/dH", &notation)
            .expect("line should parse");
        assert_eq!(terms, vec!["1.0*C", "2.0*H", "1.0*H", "1.0*dI/dH"]);
    }

    #[test]
    fn engine_output_with_spaced_markers_is_normalized() {
        let notation = EquationNotation::default();
        let terms = parse_terms(
            "-0.2134 * d^2I/dx0^2{power: 1.0} + 0.0 * I{power: 1.0} + -0.0021 = dI/dx0{power: 1.0}\n",
            &notation,
        )
        .expect("line should parse");
        assert_eq!(
            terms,
            vec!["-0.2134*d^2I/dH^2", "0.0*I", "-0.0021", "1.0*dI/dH"]
        );
    }

    #[test]
    fn grid_token_alias_survives_marker_removal() {
        let notation = EquationNotation::default();
        let terms = parse_terms("0.5 * t{power: 1.0, dim: 0.0} = dI/dH", &notation)
            .expect("line should parse");
        assert_eq!(terms, vec!["0.5*H", "1.0*dI/dH"]);
    }

    #[test]
    fn display_symbol_is_configurable() {
        let notation = EquationNotation {
            coordinate_symbol: "y".to_string(),
            ..EquationNotation::default()
        };
        let terms = parse_terms("3.0*x0 = dI/dx0", &notation).expect("line should parse");
        assert_eq!(terms, vec!["3.0*y", "1.0*dI/dy"]);
    }

    #[test]
    fn lines_without_exactly_one_equals_are_rejected() {
        let notation = EquationNotation::default();
        for line in ["1.0*x0 + 2.0", "1.0 = 2.0 = dI/dH", ""] {
            let error = parse_terms(line, &notation).expect_err("line should be rejected");
            assert!(matches!(error, AnalysisError::MalformedEquation { .. }));
        }
    }
}
