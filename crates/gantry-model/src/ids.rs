//! Identifier segment derivation.

/// Collapse a display name into a PascalCase id segment.
///
/// Splits on anything that is not alphanumeric, upper-cases the first
/// letter of each word, and concatenates. The result is stable for a given
/// input, which is what makes generated job ids reproducible.
pub(crate) fn segment(raw: &str) -> String {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
