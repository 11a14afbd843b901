//! Utterance normalization
//!
//! Normalizes raw user text before classification and extraction: lowercase,
//! punctuation stripped to whitespace-separated tokens, and known typo or
//! synonym tokens rewritten to a canonical form.

/// Normalizes user utterances to canonical token streams
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    /// Whole-token rewrites, (from, to). Token-level so that repeated
    /// normalization is a fixed point.
    rewrites: Vec<(String, String)>,
}

impl Normalizer {
    /// Normalizer with no rewrites
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizer with a typo/synonym rewrite table
    pub fn with_rewrites(rewrites: Vec<(String, String)>) -> Self {
        let rewrites = rewrites
            .into_iter()
            .map(|(from, to)| (from.to_lowercase(), to.to_lowercase()))
            .collect();
        Self { rewrites }
    }

    /// Normalize one utterance.
    ///
    /// Pure and idempotent; empty or punctuation-only input yields "".
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();

        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| self.rewrite(t))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn rewrite<'a>(&'a self, token: &'a str) -> &'a str {
        self.rewrites
            .iter()
            .find(|(from, _)| from == token)
            .map(|(_, to)| to.as_str())
            .unwrap_or(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delivery_normalizer() -> Normalizer {
        Normalizer::with_rewrites(vec![("deliver".to_string(), "delivery".to_string())])
    }

    #[test]
    fn test_lowercase_and_punctuation() {
        let n = Normalizer::new();
        assert_eq!(n.normalize("Hello, WORLD!!"), "hello world");
        assert_eq!(n.normalize("  what's  the menu? "), "what s the menu");
    }

    #[test]
    fn test_empty_and_symbol_only() {
        let n = Normalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("?!... ---"), "");
    }

    #[test]
    fn test_rewrites_whole_tokens() {
        let n = delivery_normalizer();
        assert_eq!(n.normalize("Deliver charge?"), "delivery charge");
        // Already-canonical tokens are left alone
        assert_eq!(n.normalize("delivery charge"), "delivery charge");
    }

    #[test]
    fn test_idempotent() {
        let n = delivery_normalizer();
        for input in ["Plz DELIVER now!", "2 Burgers & 1 Coke.", ""] {
            let once = n.normalize(input);
            assert_eq!(n.normalize(&once), once);
        }
    }
}
