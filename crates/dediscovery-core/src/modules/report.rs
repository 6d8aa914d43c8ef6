use crate::common::EquationNotation;
use crate::domain::AnalysisResult;
use crate::modules::aggregate::{RMSE_COLUMN, ResultRow, ResultsTable};
use crate::modules::equation::CONSTANT_LABEL;
use crate::modules::serialization::write_verbatim_artifact;
use std::path::Path;
use tracing::info;

const MATH_DELIMITER: &str = "$$";
const EMPTY_BODY: &str = "$$0.000";
const ORPHAN_CDOT: &str = "\\cdot  ";

/// Renders one Markdown/LaTeX paragraph per table row.
///
/// Terms follow table column order; the target term and zero coefficients
/// are left out and the constant term loses its label.
pub fn render_report(table: &ResultsTable, notation: &EquationNotation) -> Vec<String> {
    let labels: Vec<&str> = table
        .columns()
        .filter(|label| *label != RMSE_COLUMN && *label != notation.target_label)
        .collect();
    table
        .rows()
        .iter()
        .map(|row| render_row(row, &labels, notation))
        .collect()
}

fn render_row(row: &ResultRow, labels: &[&str], notation: &EquationNotation) -> String {
    let terms: Vec<String> = labels
        .iter()
        .filter_map(|label| {
            let coefficient = row.value(label);
            if coefficient == 0.0 {
                return None;
            }
            let label = if *label == CONSTANT_LABEL { "" } else { *label };
            Some(format!("{coefficient:.3} \\cdot {label}"))
        })
        .collect();

    let body = if terms.is_empty() {
        EMPTY_BODY.to_string()
    } else {
        format!("{MATH_DELIMITER}{}", terms.join(" + "))
    };

    let line = format!(
        "{} = {}, index = {}, run = {}, rmse = {:.3}: {body} = {}{MATH_DELIMITER}\n\n",
        notation.param_symbol, row.key.param, row.key.index, row.key.run, row.rmse, notation.target_label
    );

    let line = line.replace("+ -", "- ");
    let line = if notation.target_label.is_empty() {
        line
    } else {
        line.replace(&notation.target_label, &notation.target_display)
    };
    line.replace(ORPHAN_CDOT, "")
}

pub fn write_report(lines: &[String], path: &Path) -> AnalysisResult<()> {
    write_verbatim_artifact(path, &lines.concat())?;
    info!(path = %path.display(), rows = lines.len(), "wrote equation report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{render_report, write_report};
    use crate::common::EquationNotation;
    use crate::domain::RunKey;
    use crate::modules::aggregate::{ResultRow, ResultsTable};
    use crate::modules::equation::TermCoefficientMap;
    use std::fs;
    use tempfile::TempDir;

    fn table(rows: &[(RunKey, &[(&str, f64)], f64)]) -> ResultsTable {
        let mut table = ResultsTable::new();
        for (key, terms, rmse) in rows {
            let mut coefficients = TermCoefficientMap::new();
            for (label, coefficient) in *terms {
                coefficients.insert(*label, *coefficient);
            }
            table.push(ResultRow {
                file_name: format!("eqn_{}.txt", key.suffix()),
                key: *key,
                coefficients,
                rmse: *rmse,
            });
        }
        table
    }

    #[test]
    fn constant_and_linear_terms_render_as_latex() {
        let table = table(&[(
            RunKey::new(0.1, 0, 0),
            &[("C", 1.0), ("H", 1.0), ("dI/dH", 1.0)],
            0.2,
        )]);
        let lines = render_report(&table, &EquationNotation::default());
        assert_eq!(
            lines,
            vec![
                "$r_0$ = 0.1, index = 0, run = 0, rmse = 0.200: $$1.000 + 1.000 \\cdot H = \\frac{dI}{dH}$$\n\n"
                    .to_string()
            ]
        );
    }

    #[test]
    fn negative_terms_fold_into_subtraction() {
        let table = table(&[(
            RunKey::new(0.3, 1, 2),
            &[("d^2I/dH^2", 0.25), ("I", -1.5), ("C", -0.0021), ("dI/dH", 1.0)],
            1.23456,
        )]);
        let lines = render_report(&table, &EquationNotation::default());
        assert_eq!(
            lines[0],
            "$r_0$ = 0.3, index = 1, run = 2, rmse = 1.235: $$0.250 \\cdot d^2I/dH^2 - 1.500 \\cdot I - 0.002 = \\frac{dI}{dH}$$\n\n"
        );
    }

    #[test]
    fn row_without_other_terms_renders_zero_body() {
        let table = table(&[
            (RunKey::new(0.1, 0, 0), &[("H", 2.0), ("dI/dH", 1.0)], 0.0),
            (RunKey::new(1_i64, 0, 0), &[("dI/dH", 1.0)], 0.5),
        ]);
        let lines = render_report(&table, &EquationNotation::default());
        assert_eq!(
            lines[1],
            "$r_0$ = 1, index = 0, run = 0, rmse = 0.500: $$0.000 = \\frac{dI}{dH}$$\n\n"
        );
    }

    #[test]
    fn rendering_is_deterministic_and_written_verbatim() {
        let table = table(&[
            (RunKey::new(0.1, 0, 0), &[("C", 1.0), ("dI/dH", 1.0)], 0.1),
            (RunKey::new(0.2, 0, 0), &[("I", 2.0), ("dI/dH", 1.0)], 0.2),
        ]);
        let notation = EquationNotation::default();
        let first = render_report(&table, &notation);
        assert_eq!(first, render_report(&table, &notation));

        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("total_results_optics.md");
        write_report(&first, &path).expect("report should be written");
        assert_eq!(
            fs::read_to_string(&path).expect("report should be readable"),
            first.concat()
        );
    }
}
