use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use super::normalize::{normalize_key, title_case};
use crate::model::columns::FREQUENCY_SUFFIX;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(199[0-9]|20[0-2][0-9])\b").expect("valid year pattern"));

/// Whether a survey answer is the affirmative sentinel.
///
/// Handles formats like:
/// - "SI" -> true
/// - " si " -> true
/// - "SÍ" -> true
/// - "NO", "SIN DATOS", absent -> false
pub fn is_affirmative(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(normalize_key(v).as_str(), "SI" | "SÍ"),
        None => false,
    }
}

/// Four-digit years between 1990 and 2029 mentioned in a narrative.
pub fn extract_years(text: &str) -> Vec<u16> {
    YEAR.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Parse a `dd/mm/yyyy` visit date. Invalid dates yield `None`.
pub fn parse_visit_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%d/%m/%Y").ok()
}

/// Activity name for a frequency column: `HUERTA_CASERA_FRECUENCIA` -> `Huerta Casera`.
///
/// Returns `None` for columns that are not frequency columns.
pub fn activity_name(column: &str) -> Option<String> {
    let idx = column.find(FREQUENCY_SUFFIX)?;
    let name = title_case(&column[..idx].replace('_', " "));
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affirmative() {
        assert!(is_affirmative(Some("SI")));
        assert!(is_affirmative(Some(" si ")));
        assert!(is_affirmative(Some("SÍ")));
        assert!(!is_affirmative(Some("NO")));
        assert!(!is_affirmative(Some("SIN DATOS")));
        assert!(!is_affirmative(None));
    }

    #[test]
    fn test_extract_years() {
        let text = "Hace 6 años inicié en 2018, la iniciativa nace en 1996 y desde 2007 hay talleres";
        assert_eq!(extract_years(text), vec![2018, 1996, 2007]);
    }

    #[test]
    fn test_extract_years_ignores_out_of_range() {
        assert!(extract_years("en 1985 y 2031, código 120190").is_empty());
    }

    #[test]
    fn test_parse_visit_date() {
        assert_eq!(
            parse_visit_date("13/05/2025"),
            NaiveDate::from_ymd_opt(2025, 5, 13)
        );
        assert_eq!(parse_visit_date("2025-05-13"), None);
        assert_eq!(parse_visit_date("31/02/2025"), None);
    }

    #[test]
    fn test_activity_name() {
        assert_eq!(
            activity_name("HUERTA_CASERA_FRECUENCIA").as_deref(),
            Some("Huerta Casera")
        );
        assert_eq!(activity_name("TALLERES_FRECUENCIA").as_deref(), Some("Talleres"));
        assert_eq!(activity_name("_FRECUENCIA"), None);
        assert_eq!(activity_name("COMUNA"), None);
    }
}
