use serde::{Deserialize, Serialize};

use crate::parsing::SplitPolicy;

/// A rule table mapping tokens of one survey field to category labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTableDef {
    /// Identifier used to look the table up (e.g. "etnia").
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    /// Column this table classifies by default.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub split: SplitPolicy,
    #[serde(default)]
    pub mode: MatchMode,
    pub fallback: Fallback,
    /// If set, an absent value contributes one token with this label.
    #[serde(default)]
    pub missing: Option<String>,
    /// Display order for aggregated labels. Unlisted labels follow.
    #[serde(default)]
    pub order: Vec<String>,
    /// Ordered rules; in first-match mode the first hit wins.
    #[serde(default)]
    pub rules: Vec<CategoryRuleDef>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// One label per token: the first matching rule.
    #[default]
    FirstMatch,
    /// Every matching rule adds its label once.
    AllMatches,
}

/// Label given to tokens no rule matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// A fixed label such as "No especificado".
    Label(String),
    /// The token itself is the label.
    Token,
}

/// One ordered rule: a label and the patterns that select it.
///
/// Patterns are compared against the uppercased token; any hit matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRuleDef {
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contains: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub equals: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub starts_with: Vec<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CategoryRuleDef {
    pub fn pattern_count(&self) -> usize {
        self.contains.len() + self.equals.len() + self.starts_with.len()
    }

    /// Patterns as `kind:pattern` strings, for explanations.
    pub fn describe_patterns(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.pattern_count());
        out.extend(self.contains.iter().map(|p| format!("contains \"{p}\"")));
        out.extend(self.equals.iter().map(|p| format!("equals \"{p}\"")));
        out.extend(self.starts_with.iter().map(|p| format!("starts with \"{p}\"")));
        out
    }
}
