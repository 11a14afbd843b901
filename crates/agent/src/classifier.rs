//! Intent classification
//!
//! Maps normalized text to one of the closed set of user intents by fuzzy
//! matching against per-intent keyword sets. Fuzzy matching absorbs typos
//! and casual phrasing ("shukriya", "yeah", "nah") without an exhaustive
//! keyword list.

use order_agent_core::UserIntent;
use order_agent_text_processing::{char_ratio, token_set_ratio};

/// Minimum word length considered for character-level comparison
const MIN_WORD_LEN: usize = 3;

/// Fuzzy keyword classifier over the closed intent set
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Acceptance threshold on the 0-100 scale
    threshold: f32,
    /// (intent, keywords) in enumeration order; ties keep the first entry
    table: Vec<(UserIntent, Vec<&'static str>)>,
}

impl IntentClassifier {
    /// Classifier with the default keyword table
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            table: default_keyword_table(),
        }
    }

    /// Classify one normalized utterance.
    ///
    /// Deterministic: the same text and table always yield the same intent.
    /// Returns `UserIntent::None` when no intent clears the threshold.
    pub fn classify(&self, text: &str) -> UserIntent {
        if text.trim().is_empty() {
            return UserIntent::None;
        }

        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|w| w.len() >= MIN_WORD_LEN)
            .collect();

        let mut best_intent = UserIntent::None;
        let mut best_score = 0.0f32;

        for (intent, keywords) in &self.table {
            let score = Self::score_intent(text, &words, keywords);
            // Strictly greater keeps the first intent on ties
            if score > best_score {
                best_score = score;
                best_intent = *intent;
            }
        }

        if best_score > self.threshold {
            tracing::debug!(intent = best_intent.display_name(), score = best_score, "Intent accepted");
            best_intent
        } else {
            UserIntent::None
        }
    }

    /// Max over word-level character ratios and the sentence-level set ratio
    fn score_intent(text: &str, words: &[&str], keywords: &[&'static str]) -> f32 {
        let mut score = 0.0f32;

        for keyword in keywords {
            for word in words {
                score = score.max(char_ratio(word, keyword));
            }
            score = score.max(token_set_ratio(text, keyword));
        }

        score
    }
}

/// Keyword table in intent enumeration order
fn default_keyword_table() -> Vec<(UserIntent, Vec<&'static str>)> {
    vec![
        (
            UserIntent::Greeting,
            vec!["hello", "hi", "hey", "namaste", "salaam", "good morning", "good evening"],
        ),
        (
            UserIntent::MenuRequest,
            vec!["menu", "price list", "show menu", "what do you have"],
        ),
        (
            UserIntent::Confirm,
            vec!["confirm", "confirm order", "place order", "book it"],
        ),
        (
            UserIntent::Cancel,
            vec!["no", "nah", "nope", "nothing", "cancel", "stop", "clear", "done", "that s all"],
        ),
        (
            UserIntent::AddMore,
            vec!["yes", "yeah", "yep", "sure", "haan", "more", "add more", "continue"],
        ),
        (
            UserIntent::Thanks,
            vec!["thanks", "thank you", "shukriya", "dhanyavaad"],
        ),
        (
            UserIntent::ViewCart,
            vec!["cart", "basket", "my order", "show cart", "view cart"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> IntentClassifier {
        IntentClassifier::new(70.0)
    }

    #[test]
    fn test_greeting() {
        assert_eq!(classifier().classify("hello"), UserIntent::Greeting);
        assert_eq!(classifier().classify("namaste"), UserIntent::Greeting);
    }

    #[test]
    fn test_menu_request_with_typo() {
        assert_eq!(classifier().classify("menu"), UserIntent::MenuRequest);
        assert_eq!(classifier().classify("show me the menuu"), UserIntent::MenuRequest);
    }

    #[test]
    fn test_casual_yes_and_no() {
        assert_eq!(classifier().classify("yeah"), UserIntent::AddMore);
        assert_eq!(classifier().classify("no"), UserIntent::Cancel);
        assert_eq!(classifier().classify("nah"), UserIntent::Cancel);
    }

    #[test]
    fn test_thanks_transliteration() {
        assert_eq!(classifier().classify("shukriya"), UserIntent::Thanks);
    }

    #[test]
    fn test_confirm_and_cart() {
        assert_eq!(classifier().classify("confirm"), UserIntent::Confirm);
        assert_eq!(classifier().classify("show cart"), UserIntent::ViewCart);
    }

    #[test]
    fn test_order_text_is_not_an_intent() {
        assert_eq!(classifier().classify("2 burger and 1 coke"), UserIntent::None);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(classifier().classify(""), UserIntent::None);
        assert_eq!(classifier().classify("   "), UserIntent::None);
    }

    #[test]
    fn test_deterministic() {
        let c = classifier();
        let first = c.classify("what is the delivery charge");
        for _ in 0..10 {
            assert_eq!(c.classify("what is the delivery charge"), first);
        }
    }
}
