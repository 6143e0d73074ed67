//! Character n-gram Jaccard similarity
//!
//! The deterministic last resort for Layer 2 when no embeddings exist and no
//! model is available. Good enough for development; weak on paraphrase.

use std::collections::HashSet;

/// Default n-gram size (trigrams)
pub const DEFAULT_NGRAM_SIZE: usize = 3;

fn ngrams(text: &str, n: usize) -> HashSet<String> {
    let chars: Vec<char> = text.to_lowercase().chars().collect();
    if n == 0 || chars.len() < n {
        return HashSet::new();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Jaccard similarity over lowercase character n-grams, in [0, 1]
///
/// Two texts too short to yield any n-gram are identical (1.0); if only one
/// is, they are unrelated (0.0).
pub fn ngram_similarity(text_a: &str, text_b: &str, n: usize) -> f64 {
    let a = ngrams(text_a, n);
    let b = ngrams(text_b, n);

    match (a.is_empty(), b.is_empty()) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        _ => a.intersection(&b).count() as f64 / a.union(&b).count() as f64,
    }
}

/// Trigram Jaccard similarity
pub fn trigram_similarity(text_a: &str, text_b: &str) -> f64 {
    ngram_similarity(text_a, text_b, DEFAULT_NGRAM_SIZE)
}
