//! TF-IDF vector index
//!
//! Bag-of-words index over stored questions: tf weighted by idf, L2
//! normalized, compared to the query vector by cosine similarity. No
//! neural network, no external model files.

use std::collections::{HashMap, HashSet};

/// Best-matching answer for a query
#[derive(Debug, Clone, PartialEq)]
pub struct KnowledgeHit<'a> {
    /// Raw answer text of the best-matching question
    pub answer: &'a str,
    /// Cosine similarity in [0, 1]
    pub score: f32,
}

/// TF-IDF index over one topic's (question, answer) pairs
#[derive(Debug, Clone, Default)]
pub struct TfIdfIndex {
    /// word -> vocabulary index
    vocab: HashMap<String, usize>,
    /// idf per vocabulary index
    idf: Vec<f64>,
    /// L2-normalized tf-idf vector per stored question
    question_vecs: Vec<Vec<f64>>,
    answers: Vec<String>,
}

impl TfIdfIndex {
    /// Build an index from (normalized question, raw answer) pairs.
    ///
    /// An empty pair list yields an index whose `query` always reports no
    /// match.
    pub fn build(pairs: &[(String, String)]) -> Self {
        if pairs.is_empty() {
            return Self::default();
        }

        // Vocabulary over all question terms
        let mut vocab: HashMap<String, usize> = HashMap::new();
        for (question, _) in pairs {
            for word in tokenize(question) {
                let next = vocab.len();
                vocab.entry(word.to_string()).or_insert(next);
            }
        }

        // Document frequency per term
        let mut df = vec![0.0f64; vocab.len()];
        for (question, _) in pairs {
            let unique: HashSet<&str> = tokenize(question).collect();
            for word in unique {
                if let Some(&idx) = vocab.get(word) {
                    df[idx] += 1.0;
                }
            }
        }

        let n_docs = pairs.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| if d > 0.0 { (n_docs / d).ln() + 1.0 } else { 0.0 })
            .collect();

        let mut index = Self {
            vocab,
            idf,
            question_vecs: Vec::with_capacity(pairs.len()),
            answers: pairs.iter().map(|(_, a)| a.clone()).collect(),
        };

        for (question, _) in pairs {
            let vec = index.vectorize(question);
            index.question_vecs.push(vec);
        }

        index
    }

    /// Number of indexed questions
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether the index holds no questions
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Best-matching answer for a normalized query.
    ///
    /// Returns `None` for an empty index; never panics. Ties keep the
    /// first-indexed question (stable argmax).
    pub fn query(&self, text: &str) -> Option<KnowledgeHit<'_>> {
        if self.is_empty() {
            return None;
        }

        let query_vec = self.vectorize(text);

        let mut best_idx = 0usize;
        let mut best_score = f64::MIN;
        for (idx, question_vec) in self.question_vecs.iter().enumerate() {
            let score = cosine(&query_vec, question_vec);
            if score > best_score {
                best_score = score;
                best_idx = idx;
            }
        }

        Some(KnowledgeHit {
            answer: &self.answers[best_idx],
            score: best_score.clamp(0.0, 1.0) as f32,
        })
    }

    /// TF-IDF vector for a text, L2 normalized
    fn vectorize(&self, text: &str) -> Vec<f64> {
        let mut vec = vec![0.0f64; self.vocab.len()];
        let words: Vec<&str> = tokenize(text).collect();
        if words.is_empty() {
            return vec;
        }

        let n = words.len() as f64;
        for word in words {
            if let Some(&idx) = self.vocab.get(word) {
                vec[idx] += 1.0 / n;
            }
        }
        for (idx, v) in vec.iter_mut().enumerate() {
            *v *= self.idf[idx];
        }

        l2_normalize(&mut vec);
        vec
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn l2_normalize(v: &mut [f64]) {
    let norm = v.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 1e-10 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(&x, &y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq_pairs() -> Vec<(String, String)> {
        vec![
            (
                "what is the delivery charge".to_string(),
                "Delivery is free above Rs.500.".to_string(),
            ),
            (
                "what are your opening hours".to_string(),
                "We are open 10am to 11pm.".to_string(),
            ),
            (
                "do you accept cards".to_string(),
                "Yes, all major cards are accepted.".to_string(),
            ),
        ]
    }

    #[test]
    fn test_exact_question_scores_high() {
        let index = TfIdfIndex::build(&faq_pairs());
        let hit = index.query("what is the delivery charge").unwrap();
        assert_eq!(hit.answer, "Delivery is free above Rs.500.");
        assert!(hit.score > 0.99);
    }

    #[test]
    fn test_partial_question_matches() {
        let index = TfIdfIndex::build(&faq_pairs());
        let hit = index.query("delivery charge").unwrap();
        assert_eq!(hit.answer, "Delivery is free above Rs.500.");
        assert!(hit.score > 0.3);
    }

    #[test]
    fn test_unrelated_query_scores_low() {
        let index = TfIdfIndex::build(&faq_pairs());
        let hit = index.query("xylophone weather report").unwrap();
        assert!(hit.score < 0.3);
    }

    #[test]
    fn test_empty_index_no_match() {
        let index = TfIdfIndex::build(&[]);
        assert!(index.query("anything").is_none());
    }

    #[test]
    fn test_tie_keeps_first_indexed() {
        let pairs = vec![
            ("delivery time".to_string(), "first".to_string()),
            ("delivery time".to_string(), "second".to_string()),
        ];
        let index = TfIdfIndex::build(&pairs);
        let hit = index.query("delivery time").unwrap();
        assert_eq!(hit.answer, "first");
    }
}
