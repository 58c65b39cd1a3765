use cedeco_core::error::CedecoError;
use cedeco_core::rules::builtin;
use cedeco_core::rules::schema::{Fallback, MatchMode, RuleTableDef};
use std::path::Path;

pub fn list() -> Result<(), CedecoError> {
    println!("Available built-in rule tables:\n");
    for key in builtin::PRESETS {
        let table = builtin::load_preset(key)?;
        let field_info = match table.field.as_deref() {
            Some(f) => format!(" [{}]", f),
            None => String::new(),
        };
        println!("  {:<26} {} (v{}){}", key, table.name, table.version, field_info);
        if let Some(ref desc) = table.description {
            println!("  {:<26} {}", "", desc);
        }
        println!();
    }
    Ok(())
}

pub fn explain(key: &str) -> Result<(), CedecoError> {
    let table = builtin::load_preset(key)?;

    println!("{} (version {})\n", table.name, table.version);

    if let Some(ref desc) = table.description {
        println!("{}\n", desc);
    }

    if let Some(ref field) = table.field {
        println!("Applies to column: {}", field);
    }
    println!("Split policy:      {}", table.split);
    println!("Match mode:        {}", mode_text(table.mode));
    println!("Unmatched tokens:  {}", fallback_text(&table.fallback));
    if let Some(ref missing) = table.missing {
        println!("Missing answers:   counted as \"{}\"", missing);
    }
    println!();

    if table.rules.is_empty() {
        println!("No rules: every token is reported by the fallback above.\n");
    } else {
        println!("Rules (checked in order):\n");

        let max_label = table
            .rules
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(20);

        for (i, rule) in table.rules.iter().enumerate() {
            println!(
                "  {:>2}. {:<width$}  {}",
                i + 1,
                rule.label,
                rule.describe_patterns().join(", "),
                width = max_label
            );
            if let Some(ref note) = rule.note {
                println!("      {:<width$}  ({})", "", note, width = max_label);
            }
        }
        println!();
    }

    if !table.order.is_empty() {
        println!("Display order: {}\n", table.order.join(" > "));
    }

    Ok(())
}

fn mode_text(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::FirstMatch => "first_match (one label per token)",
        MatchMode::AllMatches => "all_matches (every matching rule adds its label)",
    }
}

fn fallback_text(fallback: &Fallback) -> String {
    match fallback {
        Fallback::Label(label) => format!("labelled \"{}\"", label),
        Fallback::Token => "kept as written".to_string(),
    }
}

pub fn schema() -> Result<(), CedecoError> {
    print!(
        r#"JSON Rule Schema
================

A rule file defines how the answers to one survey column are grouped into
categories. When you run `cedeco report`, each answer is split into tokens
and every token is given the label of the rule it matches. A file whose
key equals a built-in table replaces that table.

Top-level fields:
  key           (string, required)  Table identifier, e.g. "etnia".
                                    Run `cedeco rules list` for built-in keys.
  name          (string, required)  Human-readable name of the table
  description   (string, optional)  What this table is for
  version       (string, required)  Version identifier (e.g., "2024.1")
  field         (string, optional)  Survey column the table applies to
  split         (string, optional)  How an answer is cut into tokens:
                                    "whole" (default), "comma", "semicolon",
                                    "comma_or_whitespace",
                                    "comma_outside_parentheses",
                                    "lettered_list"
  mode          (string, optional)  "first_match" (default): a token takes
                                    the label of the first matching rule.
                                    "all_matches": every matching rule adds
                                    its label once.
  fallback      (object, required)  Label for tokens no rule matches:
                                    {{ "label": "Otros" }} or "token" to keep
                                    the token itself as the label.
  missing       (string, optional)  Label counted once for a blank answer.
                                    Omit to skip blank answers.
  order         (array, optional)   Display order of labels in reports.
                                    Unlisted labels follow in first-seen order.
  rules         (array, optional)   Ordered list of rules (see below)

Each rule in the "rules" array:
  label         (string, required)  Category label reported for a match
  contains      (array, optional)   Match when the token contains any entry
  equals        (array, optional)   Match when the token equals any entry
  starts_with   (array, optional)   Match when the token starts with any entry
  note          (string, optional)  Explanation shown by `cedeco rules explain`

Patterns are compared case-insensitively after trimming and collapsing
spaces. Accents matter: list both "INDÍGENA" and "INDIGENA" if needed.
Every rule needs at least one pattern.

Example:
{{
  "key": "etnia",
  "name": "Grupo étnico simplificado",
  "version": "1.0",
  "field": "POBLACION_PRINCIPAL_COMEDOR",
  "split": "whole",
  "fallback": {{ "label": "Otros grupos" }},
  "missing": "No especificado",
  "order": ["Afrodescendiente", "Mestiza", "Otros grupos"],
  "rules": [
    {{
      "label": "Afrodescendiente",
      "contains": ["AFRO", "NEGR"]
    }},
    {{
      "label": "Mestiza",
      "equals": ["MESTIZA", "MESTIZO"],
      "note": "Self-reported"
    }}
  ]
}}
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), CedecoError> {
    let table = cedeco_core::rules::load_ruleset(file)?;

    println!("Rule table '{}' (v{}) is valid.", table.key, table.version);
    println!("  Name: {}", table.name);
    println!("  Rules: {}", table.rules.len());
    if builtin::PRESETS.contains(&table.key.as_str()) {
        println!("  Replaces the built-in '{}' table when passed with --rules.", table.key);
    }

    // Check for potential issues (warnings, not errors)
    let warnings = collect_warnings(&table);
    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}

fn collect_warnings(table: &RuleTableDef) -> Vec<String> {
    let mut warnings = Vec::new();

    for label in &table.order {
        let produced = table.rules.iter().any(|r| &r.label == label)
            || matches!(&table.fallback, Fallback::Label(l) if l == label)
            || table.missing.as_ref() == Some(label);
        if !produced && table.fallback != Fallback::Token {
            warnings.push(format!("order lists '{}' but no rule produces it", label));
        }
    }

    if table.mode == MatchMode::FirstMatch {
        for (i, rule) in table.rules.iter().enumerate() {
            let shadowed = table.rules[..i].iter().any(|earlier| {
                rule.equals
                    .iter()
                    .all(|p| earlier.equals.contains(p))
                    && rule.contains.is_empty()
                    && rule.starts_with.is_empty()
            });
            if shadowed {
                warnings.push(format!(
                    "rule '{}' can never match: earlier rules cover all its patterns",
                    rule.label
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use cedeco_core::rules::parse_ruleset_str;

    #[test]
    fn test_every_builtin_explains() {
        for key in builtin::PRESETS {
            assert!(explain(key).is_ok(), "{key}");
        }
    }

    #[test]
    fn test_unknown_key_is_error() {
        assert!(matches!(
            explain("nope"),
            Err(CedecoError::UnknownPreset { .. })
        ));
    }

    #[test]
    fn test_warnings_for_unreachable_order_and_shadowed_rule() {
        let table = parse_ruleset_str(
            r#"{
                "key": "t",
                "name": "T",
                "version": "1",
                "fallback": { "label": "Otros" },
                "order": ["Uno", "Fantasma"],
                "rules": [
                    { "label": "Uno", "equals": ["A", "B"] },
                    { "label": "Dos", "equals": ["A"] }
                ]
            }"#,
        )
        .unwrap();
        let warnings = collect_warnings(&table);
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Fantasma"));
        assert!(warnings[1].contains("'Dos'"));
    }
}
