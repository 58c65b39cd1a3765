use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Width above which descriptions are shortened for display.
pub const DISPLAY_WIDTH: usize = 40;

const ELLIPSIS: &str = "...";

/// A capital letter at a word boundary, a period, then whitespace or end of text.
static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Z])\.(?:\s+|$)").expect("valid marker pattern"));

/// One entry of an `A. <text> B. <text>` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetteredItem {
    pub letter: char,
    /// Full description, trimmed and without trailing periods.
    pub description: String,
}

impl LetteredItem {
    /// Grouping key: letter plus the untruncated description.
    pub fn key(&self) -> String {
        format!("{}. {}", self.letter, self.description)
    }

    /// Label for display, with the description shortened to `width`.
    pub fn display(&self, width: usize) -> String {
        format!("{}. {}", self.letter, truncate_display(&self.description, width))
    }
}

/// Extract `(letter, description)` items in order of appearance.
///
/// Text before the first marker is ignored, as are markers with an empty
/// description. Text without any marker yields nothing.
pub fn extract_lettered(text: &str) -> Vec<LetteredItem> {
    let markers: Vec<(char, usize, usize)> = MARKER
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((letter, whole.start(), whole.end()))
        })
        .collect();

    let mut items = Vec::with_capacity(markers.len());
    for (i, &(letter, _, body_start)) in markers.iter().enumerate() {
        let body_end = markers
            .get(i + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(text.len());
        let description = text[body_start..body_end]
            .trim()
            .trim_end_matches(|c: char| c == '.' || c.is_whitespace());
        if description.is_empty() {
            continue;
        }
        items.push(LetteredItem {
            letter,
            description: description.to_string(),
        });
    }

    items
}

/// Shorten `text` to at most `width` characters, ending in `...` when cut.
pub fn truncate_display(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let mut short: String = text.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

/// Display form of a lettered grouping key (`"A. <description>"`).
///
/// Keys that do not look like lettered items are truncated as a whole.
pub fn display_key(key: &str, width: usize) -> String {
    let mut chars = key.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(letter), Some('.'), Some(' ')) if letter.is_ascii_uppercase() => {
            format!("{}. {}", letter, truncate_display(&key[3..], width))
        }
        _ => truncate_display(key, width),
    }
}
