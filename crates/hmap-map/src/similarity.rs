//! String similarity scorers on a 0-100 scale.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

/// Edit-distance ratio between two strings, 0-100.
///
/// Based on the normalized indel distance (insertions and deletions only),
/// rounded half-to-even. Either side being empty scores 0.
pub fn ratio(left: &str, right: &str) -> u32 {
    if left.is_empty() || right.is_empty() {
        return 0;
    }
    let similarity = indel::normalized_similarity(left.chars(), right.chars());
    to_percent(similarity)
}

/// Order- and duplication-insensitive token overlap score, 0-100.
///
/// Both inputs are split into token sets. The shared tokens are compared
/// against each side's full token set and the best pairwise [`ratio`] wins,
/// so a short header fully contained in a long description scores 100.
pub fn token_set_ratio(left: &str, right: &str) -> u32 {
    let left = alphanumeric_only(left);
    let right = alphanumeric_only(right);
    let left_tokens: BTreeSet<&str> = left.split_whitespace().collect();
    let right_tokens: BTreeSet<&str> = right.split_whitespace().collect();
    if left_tokens.is_empty() || right_tokens.is_empty() {
        return 0;
    }

    let shared = join(left_tokens.intersection(&right_tokens));
    let left_only = join(left_tokens.difference(&right_tokens));
    let right_only = join(right_tokens.difference(&left_tokens));

    let left_combined = format!("{shared} {left_only}").trim().to_string();
    let right_combined = format!("{shared} {right_only}").trim().to_string();

    [
        ratio(&shared, &left_combined),
        ratio(&shared, &right_combined),
        ratio(&left_combined, &right_combined),
    ]
    .into_iter()
    .max()
    .unwrap_or(0)
}

fn to_percent(similarity: f64) -> u32 {
    (similarity * 100.0).round_ties_even().clamp(0.0, 100.0) as u32
}

/// Lowercased ASCII alphanumerics; other ASCII becomes a space and
/// non-ASCII characters are dropped.
fn alphanumeric_only(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii)
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect()
}

fn join<'a, 'b: 'a>(tokens: impl Iterator<Item = &'a &'b str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}
