//! String similarity ratios
//!
//! Both ratios are scored on a 0-100 scale so thresholds read like the
//! classic fuzzy-matching libraries: `char_ratio` compares characters,
//! `token_set_ratio` compares whole sentences as word sets.

use std::collections::HashSet;

/// Character-level similarity ratio between two strings, 0-100.
pub fn char_ratio(a: &str, b: &str) -> f32 {
    (strsim::normalized_levenshtein(a, b) * 100.0) as f32
}

/// Set-overlap similarity between two sentences' word sets, 0-100.
///
/// Dice coefficient over unique tokens: word order and repetition are
/// ignored, which absorbs casual phrasing around the keywords.
pub fn token_set_ratio(a: &str, b: &str) -> f32 {
    let set_a: HashSet<&str> = a.split_whitespace().collect();
    let set_b: HashSet<&str> = b.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let overlap = set_a.intersection(&set_b).count() as f32;
    overlap * 2.0 / (set_a.len() + set_b.len()) as f32 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_ratio_exact_and_typo() {
        assert_eq!(char_ratio("menu", "menu"), 100.0);
        assert!(char_ratio("burgr", "burger") > 80.0);
        assert!(char_ratio("pizza", "coke") < 40.0);
    }

    #[test]
    fn test_token_set_ratio() {
        assert_eq!(token_set_ratio("show menu", "menu show"), 100.0);
        assert!(token_set_ratio("show me the menu", "menu") > 35.0);
        assert_eq!(token_set_ratio("", "menu"), 0.0);
    }

    #[test]
    fn test_token_set_ignores_repeats() {
        assert_eq!(token_set_ratio("yes yes yes", "yes"), 100.0);
    }
}
