//! Quantity parsing
//!
//! Maps digit tokens and small number words to quantities. Malformed or
//! implausibly large tokens yield `None`; the extractor falls back to a
//! quantity of 1.

/// Largest quantity accepted from a single token
pub const MAX_QUANTITY: u32 = 1_000;

/// Number words recognized as quantities
const NUMBER_WORDS: [(&str, u32); 20] = [
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
];

/// Parse a quantity token (digits or a number word).
///
/// Only positive quantities up to `MAX_QUANTITY` are returned; "0",
/// oversized numbers and unrecognized tokens are `None`.
pub fn parse_quantity(token: &str) -> Option<u32> {
    let token = token.trim().to_lowercase();

    if let Ok(n) = token.parse::<u32>() {
        return (n > 0 && n <= MAX_QUANTITY).then_some(n);
    }

    NUMBER_WORDS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, n)| *n)
}
