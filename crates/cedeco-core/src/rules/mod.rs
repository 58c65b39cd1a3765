pub mod builtin;
pub mod schema;

use crate::error::CedecoError;
use schema::{Fallback, RuleTableDef};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Load a rule table from a JSON file.
pub fn load_ruleset(path: &Path) -> Result<RuleTableDef, CedecoError> {
    let content = std::fs::read_to_string(path).map_err(|e| CedecoError::RulesetLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_ruleset(&content, path)
}

/// Parse a rule table from a JSON string.
pub fn parse_ruleset(json: &str, source: &Path) -> Result<RuleTableDef, CedecoError> {
    let table: RuleTableDef = serde_json::from_str(json).map_err(|e| CedecoError::RulesetLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_ruleset(&table)?;
    Ok(table)
}

/// Parse a rule table from a JSON string (no file path context).
pub fn parse_ruleset_str(json: &str) -> Result<RuleTableDef, CedecoError> {
    let table: RuleTableDef = serde_json::from_str(json).map_err(CedecoError::Json)?;
    validate_ruleset(&table)?;
    Ok(table)
}

/// Validate that a rule table is well-formed.
pub fn validate_ruleset(table: &RuleTableDef) -> Result<(), CedecoError> {
    if table.key.trim().is_empty() {
        return Err(CedecoError::RulesetInvalid("key must not be empty".into()));
    }

    if table.name.trim().is_empty() {
        return Err(CedecoError::RulesetInvalid(format!(
            "table '{}' has an empty name",
            table.key
        )));
    }

    if let Fallback::Label(label) = &table.fallback {
        if label.trim().is_empty() {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}' has an empty fallback label",
                table.key
            )));
        }
    }

    if let Some(missing) = &table.missing {
        if missing.trim().is_empty() {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}' has an empty missing-value label",
                table.key
            )));
        }
    }

    for (i, rule) in table.rules.iter().enumerate() {
        if rule.label.trim().is_empty() {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}': rule #{} has an empty label",
                table.key,
                i + 1
            )));
        }

        if rule.pattern_count() == 0 {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}': rule '{}' has no patterns",
                table.key, rule.label
            )));
        }

        let has_blank = rule
            .contains
            .iter()
            .chain(&rule.equals)
            .chain(&rule.starts_with)
            .any(|p| p.trim().is_empty());
        if has_blank {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}': rule '{}' has an empty pattern",
                table.key, rule.label
            )));
        }
    }

    let mut seen = HashSet::new();
    for label in &table.order {
        if !seen.insert(label.as_str()) {
            return Err(CedecoError::RulesetInvalid(format!(
                "table '{}': label '{}' appears twice in order",
                table.key, label
            )));
        }
    }

    Ok(())
}

/// The rule tables active for a report, keyed by table key.
#[derive(Debug, Clone, Default)]
pub struct RuleCatalog {
    tables: BTreeMap<String, RuleTableDef>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding every built-in table.
    pub fn builtin() -> Result<Self, CedecoError> {
        let mut catalog = Self::new();
        for key in builtin::PRESETS {
            catalog.insert(builtin::load_preset(key)?);
        }
        Ok(catalog)
    }

    /// Add a table, replacing any table with the same key. Returns the replaced table.
    pub fn insert(&mut self, table: RuleTableDef) -> Option<RuleTableDef> {
        self.tables.insert(table.key.clone(), table)
    }

    /// Add tables loaded from files, replacing built-ins with the same key.
    pub fn extend_from_files(&mut self, paths: &[impl AsRef<Path>]) -> Result<(), CedecoError> {
        for path in paths {
            let table = load_ruleset(path.as_ref())?;
            if self.insert(table).is_some() {
                tracing::info!(path = %path.as_ref().display(), "rule table overrides built-in");
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&RuleTableDef> {
        self.tables.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ruleset() {
        let json = r#"{
            "key": "etnia",
            "name": "Grupo étnico",
            "version": "1.0",
            "fallback": { "label": "No especificado" },
            "rules": [
                { "label": "Mestizo", "contains": ["MESTIZA"] }
            ]
        }"#;
        let table = parse_ruleset_str(json).unwrap();
        assert_eq!(table.key, "etnia");
        assert_eq!(table.rules.len(), 1);
        assert_eq!(table.split, crate::parsing::SplitPolicy::Whole);
        assert_eq!(table.mode, schema::MatchMode::FirstMatch);
    }

    #[test]
    fn test_token_fallback_parses() {
        let json = r#"{
            "key": "fuentes",
            "name": "Fuentes",
            "version": "1.0",
            "split": "comma",
            "fallback": "token"
        }"#;
        let table = parse_ruleset_str(json).unwrap();
        assert_eq!(table.fallback, Fallback::Token);
        assert!(table.rules.is_empty());
    }

    #[test]
    fn test_rule_without_patterns_rejected() {
        let json = r#"{
            "key": "bad",
            "name": "Bad",
            "version": "1.0",
            "fallback": "token",
            "rules": [ { "label": "X" } ]
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_blank_pattern_rejected() {
        let json = r#"{
            "key": "bad",
            "name": "Bad",
            "version": "1.0",
            "fallback": "token",
            "rules": [ { "label": "X", "contains": [" "] } ]
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_duplicate_order_rejected() {
        let json = r#"{
            "key": "bad",
            "name": "Bad",
            "version": "1.0",
            "fallback": "token",
            "order": ["A", "A"]
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_unknown_split_policy_rejected() {
        let json = r#"{
            "key": "bad",
            "name": "Bad",
            "version": "1.0",
            "split": "pipe",
            "fallback": "token"
        }"#;
        assert!(parse_ruleset_str(json).is_err());
    }

    #[test]
    fn test_catalog_override_replaces_builtin() {
        let mut catalog = RuleCatalog::builtin().unwrap();
        let before = catalog.len();
        let custom = parse_ruleset_str(
            r#"{ "key": "etnia", "name": "Custom", "version": "9", "fallback": "token" }"#,
        )
        .unwrap();
        assert!(catalog.insert(custom).is_some());
        assert_eq!(catalog.len(), before);
        assert_eq!(catalog.get("etnia").unwrap().name, "Custom");
    }
}
