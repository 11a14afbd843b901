//! Text processing for the ordering agent
//!
//! Features:
//! - Utterance normalization (casing, punctuation, typo rewrites)
//! - String similarity ratios used by the classifier and extractor
//! - Number-word parsing for spoken/typed quantities

pub mod normalizer;
pub mod numbers;
pub mod similarity;

pub use normalizer::Normalizer;
pub use numbers::{parse_quantity, MAX_QUANTITY};
pub use similarity::{char_ratio, token_set_ratio};
