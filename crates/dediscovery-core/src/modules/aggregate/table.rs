use crate::domain::RunKey;
use crate::modules::equation::TermCoefficientMap;
use crate::numerics::format_python_float;
use serde::Serialize;

pub const RMSE_COLUMN: &str = "rmse";

/// One aggregated equation: where it came from, its coefficients and its
/// test-set error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub file_name: String,
    #[serde(skip)]
    pub key: RunKey,
    pub coefficients: TermCoefficientMap,
    pub rmse: f64,
}

impl ResultRow {
    /// Coefficient for `label`; `rmse` resolves to the row error and absent
    /// labels read as `0.0`.
    pub fn value(&self, label: &str) -> f64 {
        if label == RMSE_COLUMN {
            return self.rmse;
        }
        self.coefficients.get(label).unwrap_or(0.0)
    }
}

/// Rows in sweep order plus the union of their columns in order of first
/// appearance. `rmse` takes its place right after the labels of the first
/// row that introduced it.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ResultsTable {
    rows: Vec<ResultRow>,
    columns: Vec<String>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ResultRow) {
        for label in row.coefficients.labels().chain(std::iter::once(RMSE_COLUMN)) {
            if !self.columns.iter().any(|known| known == label) {
                self.columns.push(label.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column except `rmse`.
    pub fn term_labels(&self) -> impl Iterator<Item = &str> {
        self.columns().filter(|label| *label != RMSE_COLUMN)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn value(&self, row: usize, label: &str) -> Option<f64> {
        self.rows.get(row).map(|row| row.value(label))
    }

    /// Comma-separated rendering with an unnamed leading index column of
    /// file names, the layout `pandas.DataFrame.to_csv` produces.
    pub fn to_csv(&self) -> String {
        if self.columns.is_empty() {
            return "\"\"\n".to_string();
        }
        let mut out = String::new();
        let header: Vec<String> = std::iter::once(String::new())
            .chain(self.columns().map(csv_field))
            .collect();
        out.push_str(&header.join(","));
        out.push('\n');

        for row in &self.rows {
            let mut fields = vec![csv_field(&row.file_name)];
            fields.extend(self.columns().map(|label| format_python_float(row.value(label))));
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
