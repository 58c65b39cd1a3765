pub mod lettered;
pub mod normalize;
pub mod values;

use lettered::extract_lettered;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a raw field value is cut into tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// The whole value is a single token.
    #[default]
    Whole,
    Comma,
    Semicolon,
    /// A comma or any run of whitespace separates tokens.
    CommaOrWhitespace,
    /// Commas separate tokens unless they sit inside parentheses.
    CommaOutsideParentheses,
    /// `A. <text> B. <text>` narratives; each item becomes `"<letter>. <text>"`.
    LetteredList,
}

impl SplitPolicy {
    pub const ALL: &'static [SplitPolicy] = &[
        SplitPolicy::Whole,
        SplitPolicy::Comma,
        SplitPolicy::Semicolon,
        SplitPolicy::CommaOrWhitespace,
        SplitPolicy::CommaOutsideParentheses,
        SplitPolicy::LetteredList,
    ];
}

impl fmt::Display for SplitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitPolicy::Whole => write!(f, "whole"),
            SplitPolicy::Comma => write!(f, "comma"),
            SplitPolicy::Semicolon => write!(f, "semicolon"),
            SplitPolicy::CommaOrWhitespace => write!(f, "comma_or_whitespace"),
            SplitPolicy::CommaOutsideParentheses => write!(f, "comma_outside_parentheses"),
            SplitPolicy::LetteredList => write!(f, "lettered_list"),
        }
    }
}

/// Split a raw field value into trimmed, non-empty tokens.
///
/// Absent values and values that yield nothing under the policy produce an
/// empty sequence; this never fails.
pub fn tokenize(value: Option<&str>, policy: SplitPolicy) -> Vec<String> {
    let Some(value) = value else {
        return Vec::new();
    };

    match policy {
        SplitPolicy::Whole => collect_tokens(std::iter::once(value)),
        SplitPolicy::Comma => collect_tokens(value.split(',')),
        SplitPolicy::Semicolon => collect_tokens(value.split(';')),
        SplitPolicy::CommaOrWhitespace => {
            collect_tokens(value.split(|c: char| c == ',' || c.is_whitespace()))
        }
        SplitPolicy::CommaOutsideParentheses => collect_tokens(split_outside_parens(value)),
        SplitPolicy::LetteredList => extract_lettered(value)
            .into_iter()
            .map(|item| item.key())
            .collect(),
    }
}

fn collect_tokens<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split on commas at parenthesis depth zero.
///
/// Unbalanced closing parentheses are ignored rather than driving the depth
/// negative.
fn split_outside_parens(value: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(&value[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    pieces.push(&value[start..]);

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_value_yields_no_tokens() {
        for policy in SplitPolicy::ALL {
            assert!(tokenize(None, *policy).is_empty(), "{policy}");
        }
    }

    #[test]
    fn test_whole_trims() {
        assert_eq!(tokenize(Some("  MESTIZA "), SplitPolicy::Whole), vec!["MESTIZA"]);
        assert!(tokenize(Some("   "), SplitPolicy::Whole).is_empty());
    }

    #[test]
    fn test_comma_split_drops_empty_pieces() {
        assert_eq!(
            tokenize(Some("DONACIONES, RECURSOS PROPIOS,, "), SplitPolicy::Comma),
            vec!["DONACIONES", "RECURSOS PROPIOS"]
        );
    }

    #[test]
    fn test_semicolon_split() {
        assert_eq!(
            tokenize(Some("CORREO ELECTRÓNICO; REDES SOCIALES"), SplitPolicy::Semicolon),
            vec!["CORREO ELECTRÓNICO", "REDES SOCIALES"]
        );
    }

    #[test]
    fn test_comma_or_whitespace_split() {
        assert_eq!(
            tokenize(Some("MIGRANTES,  SPA\tCALLE"), SplitPolicy::CommaOrWhitespace),
            vec!["MIGRANTES", "SPA", "CALLE"]
        );
    }

    #[test]
    fn test_comma_outside_parentheses_keeps_groups() {
        let tokens = tokenize(
            Some("RED DE APOYO SOCIAL (AMIGOS, VECINOS), RED DE APOYO FAMILIAR"),
            SplitPolicy::CommaOutsideParentheses,
        );
        assert_eq!(
            tokens,
            vec!["RED DE APOYO SOCIAL (AMIGOS, VECINOS)", "RED DE APOYO FAMILIAR"]
        );
    }

    #[test]
    fn test_comma_outside_parentheses_unbalanced() {
        let tokens = tokenize(Some("A), B, (C, D"), SplitPolicy::CommaOutsideParentheses);
        assert_eq!(tokens, vec!["A)", "B", "(C, D"]);
    }

    #[test]
    fn test_comma_outside_parentheses_drops_empty_pieces() {
        let tokens = tokenize(
            Some(" , VOLUNTARIADO (JÓVENES, ADULTOS),, "),
            SplitPolicy::CommaOutsideParentheses,
        );
        assert_eq!(tokens, vec!["VOLUNTARIADO (JÓVENES, ADULTOS)"]);
    }

    #[test]
    fn test_lettered_list_tokens_use_full_description() {
        let tokens = tokenize(
            Some("A. Talleres formativos. B. Actividades recreativas."),
            SplitPolicy::LetteredList,
        );
        assert_eq!(tokens, vec!["A. Talleres formativos", "B. Actividades recreativas"]);
    }

    #[test]
    fn test_lettered_list_without_markers_is_empty() {
        assert!(tokenize(Some("sin formato"), SplitPolicy::LetteredList).is_empty());
    }
}
