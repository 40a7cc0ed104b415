//! Identifier and display-name derivation for raw file and folder names.

/// Derive a slug from a raw name.
///
/// The input is trimmed and lowercased, every run of whitespace or underscores becomes a single
/// hyphen, and anything outside `[a-z0-9-]` is dropped. Total over any input and idempotent; the
/// result may be empty.
pub fn normalize(raw: &str) -> String {
    let mut slug = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for ch in raw.trim().chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() || ch == '_' {
            pending_separator = true;
            continue;
        }
        if pending_separator {
            slug.push('-');
            pending_separator = false;
        }
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' {
            slug.push(ch);
        }
    }

    slug
}

/// Derive a human readable name: separators become spaces and each word is capitalized.
pub fn display_name(raw: &str) -> String {
    raw.split(|ch: char| ch == '-' || ch == '_' || ch.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
