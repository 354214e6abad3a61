//! Shared utility functions.

/// Convert a file stem to a page title.
///
/// Splits on `-` and `_`, capitalizes the first letter of each word and
/// lowercases the rest.
/// "getting-started" -> "Getting Started"
/// "README" -> "Readme"
pub fn title_case(s: &str) -> String {
    s.split(['-', '_'])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert a string to a slug suitable for use as an HTML id.
pub fn slugify(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(char::is_whitespace, "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-' && c != '_', "")
}
