use serde::{Deserialize, Serialize};

use crate::aggregate::{count_labels, CountTable};

/// Why a token received its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum MatchSource {
    /// Matched the rule at this position in the table.
    Rule { index: usize },
    /// No rule matched; the table's fallback applied.
    Fallback,
    /// The field was absent and the table labels absent values.
    Missing,
}

/// A token and the label it was classified into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedToken {
    /// The token as extracted from the field (empty for absent values).
    pub token: String,
    pub label: String,
    pub source: MatchSource,
}

/// Labels produced for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordLabels {
    /// Position of the record in its record set.
    pub record_index: usize,
    pub site: String,
    pub labels: Vec<ClassifiedToken>,
}

/// Classification of one column across a record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldClassification {
    /// Key of the rule table that was applied.
    pub table: String,
    pub column: String,
    /// Records that produced at least one label, in record order.
    pub records: Vec<RecordLabels>,
}

impl FieldClassification {
    /// All labels in record order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .flat_map(|r| r.labels.iter().map(|t| t.label.as_str()))
    }

    /// Number of labels produced (tokens plus missing-value entries).
    pub fn label_count(&self) -> usize {
        self.records.iter().map(|r| r.labels.len()).sum()
    }

    /// Number of labels that came from the fallback.
    pub fn fallback_count(&self) -> usize {
        self.records
            .iter()
            .flat_map(|r| &r.labels)
            .filter(|t| t.source == MatchSource::Fallback)
            .count()
    }

    /// Count labels in first-seen order.
    pub fn counts(&self) -> CountTable {
        count_labels(self.labels())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
