/// Normalize a token or pattern for rule matching.
///
/// Steps:
/// 1. Trim
/// 2. Collapse internal whitespace runs to one space
/// 3. Uppercase (Unicode-aware, so `á` becomes `Á`)
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Title-case each whitespace-separated word: `HUERTA CASERA` -> `Huerta Casera`.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    let rest: String = chars.collect::<String>().to_lowercase();
                    format!("{}{}", first.to_uppercase(), rest)
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
