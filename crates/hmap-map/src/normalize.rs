//! Header text normalization.

/// Normalizes a header for comparison.
///
/// Lowercases, turns the separators `_ - . ( ) /` into spaces, trims, and
/// collapses every whitespace run to a single space.
pub fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .replace(['_', '-', '.', '(', ')', '/'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
