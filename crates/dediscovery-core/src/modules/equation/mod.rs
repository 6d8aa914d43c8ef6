mod coefficients;
mod parser;

pub use coefficients::{CONSTANT_LABEL, extract_coefficients};
pub use parser::parse_terms;

use crate::common::EquationNotation;
use crate::domain::AnalysisResult;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Canonical term label -> coefficient, in first-insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TermCoefficientMap {
    entries: Vec<(String, f64)>,
}

impl TermCoefficientMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites an existing label in place, otherwise appends.
    pub fn insert(&mut self, label: impl Into<String>, coefficient: f64) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = coefficient,
            None => self.entries.push((label, coefficient)),
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, coefficient)| *coefficient)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(label, coefficient)| (label.as_str(), *coefficient))
    }
}

impl Serialize for TermCoefficientMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, coefficient) in &self.entries {
            map.serialize_entry(label, coefficient)?;
        }
        map.end()
    }
}

/// Term parsing followed by coefficient extraction for one equation line.
pub fn parse_equation(line: &str, notation: &EquationNotation) -> AnalysisResult<TermCoefficientMap> {
    let terms = parse_terms(line, notation)?;
    extract_coefficients(&terms)
}
