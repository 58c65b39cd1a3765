use crate::classify::outcome::{ClassifiedToken, FieldClassification, MatchSource, RecordLabels};
use crate::model::{Record, RecordSet};
use crate::parsing::normalize::normalize_key;
use crate::parsing::tokenize;
use crate::rules::schema::{CategoryRuleDef, Fallback, MatchMode, RuleTableDef};

/// Classify one column of a record set against a rule table.
pub fn classify(records: &RecordSet, column: &str, table: &RuleTableDef) -> FieldClassification {
    Classifier::new(table).classify_column(records, column)
}

/// A rule table prepared for matching: patterns normalized once up front.
#[derive(Debug, Clone)]
pub struct Classifier<'a> {
    table: &'a RuleTableDef,
    rules: Vec<CompiledRule<'a>>,
}

#[derive(Debug, Clone)]
struct CompiledRule<'a> {
    label: &'a str,
    contains: Vec<String>,
    equals: Vec<String>,
    starts_with: Vec<String>,
}

impl<'a> CompiledRule<'a> {
    fn compile(rule: &'a CategoryRuleDef) -> Self {
        let norm = |patterns: &[String]| patterns.iter().map(|p| normalize_key(p)).collect();
        Self {
            label: &rule.label,
            contains: norm(&rule.contains),
            equals: norm(&rule.equals),
            starts_with: norm(&rule.starts_with),
        }
    }

    /// `key` is an already-normalized token.
    fn matches(&self, key: &str) -> bool {
        self.equals.iter().any(|p| key == p)
            || self.starts_with.iter().any(|p| key.starts_with(p.as_str()))
            || self.contains.iter().any(|p| key.contains(p.as_str()))
    }
}

impl<'a> Classifier<'a> {
    pub fn new(table: &'a RuleTableDef) -> Self {
        Self {
            table,
            rules: table.rules.iter().map(CompiledRule::compile).collect(),
        }
    }

    /// Label of the first matching rule, or the fallback.
    pub fn classify_token(&self, token: &str) -> ClassifiedToken {
        let token = token.trim();
        let key = normalize_key(token);
        match self.rules.iter().position(|r| r.matches(&key)) {
            Some(index) => ClassifiedToken {
                token: token.to_string(),
                label: self.rules[index].label.to_string(),
                source: MatchSource::Rule { index },
            },
            None => self.fallback(token),
        }
    }

    /// One label per matching rule (each label at most once), or the fallback.
    pub fn classify_token_all(&self, token: &str) -> Vec<ClassifiedToken> {
        let token = token.trim();
        let key = normalize_key(token);
        let mut out: Vec<ClassifiedToken> = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            if rule.matches(&key) && !out.iter().any(|t| t.label == rule.label) {
                out.push(ClassifiedToken {
                    token: token.to_string(),
                    label: rule.label.to_string(),
                    source: MatchSource::Rule { index },
                });
            }
        }
        if out.is_empty() {
            out.push(self.fallback(token));
        }
        out
    }

    /// Tokenize a raw value with the table's split policy and classify each token.
    ///
    /// Absent values yield nothing, unless the table labels missing values.
    pub fn classify_value(&self, value: Option<&str>) -> Vec<ClassifiedToken> {
        let tokens = tokenize(value, self.table.split);

        if tokens.is_empty() {
            return match (&self.table.missing, value) {
                (Some(label), None) => vec![ClassifiedToken {
                    token: String::new(),
                    label: label.clone(),
                    source: MatchSource::Missing,
                }],
                _ => Vec::new(),
            };
        }

        match self.table.mode {
            MatchMode::FirstMatch => tokens.iter().map(|t| self.classify_token(t)).collect(),
            MatchMode::AllMatches => tokens
                .iter()
                .flat_map(|t| self.classify_token_all(t))
                .collect(),
        }
    }

    pub fn classify_record(&self, record: &Record, column: &str) -> Vec<ClassifiedToken> {
        self.classify_value(record.get(column))
    }

    pub fn classify_column(&self, records: &RecordSet, column: &str) -> FieldClassification {
        let mut classified = Vec::new();
        for (record_index, record) in records.iter().enumerate() {
            let labels = self.classify_record(record, column);
            if labels.is_empty() {
                continue;
            }
            classified.push(RecordLabels {
                record_index,
                site: record.site_name().to_string(),
                labels,
            });
        }

        let result = FieldClassification {
            table: self.table.key.clone(),
            column: column.to_string(),
            records: classified,
        };

        tracing::debug!(
            table = %self.table.key,
            column,
            labels = result.label_count(),
            fallbacks = result.fallback_count(),
            "classified column"
        );

        result
    }

    fn fallback(&self, token: &str) -> ClassifiedToken {
        let label = match &self.table.fallback {
            Fallback::Label(label) => label.clone(),
            Fallback::Token => token.to_string(),
        };
        ClassifiedToken {
            token: token.to_string(),
            label,
            source: MatchSource::Fallback,
        }
    }
}
