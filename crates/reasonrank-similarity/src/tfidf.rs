//! Dependency-free TF-IDF cosine similarity
//!
//! Used by the sibling uniqueness pass when no embedding model is available.
//! Vectors are sparse and keyed in sorted order so repeated runs sum in the
//! same order and produce bit-identical results.

use std::collections::{BTreeMap, BTreeSet};

type SparseVector = BTreeMap<String, f64>;

/// Lowercase, replace non-word characters with spaces, drop 1-char tokens
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Pairwise TF-IDF cosine similarity of every statement against every other
///
/// The matrix is symmetric. `idf = ln((n + 1) / (df + 1)) + 1` and tf is the
/// raw token count. A statement with no usable tokens is 0.0 against
/// everything, itself included.
pub fn similarity_matrix<S: AsRef<str>>(statements: &[S]) -> Vec<Vec<f64>> {
    let tokenized: Vec<Vec<String>> = statements.iter().map(|s| tokenize(s.as_ref())).collect();

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for tokens in &tokenized {
        let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in unique {
            *doc_freq.entry(token).or_default() += 1;
        }
    }

    let n_docs = statements.len() as f64;
    let vectors: Vec<SparseVector> = tokenized
        .iter()
        .map(|tokens| {
            let mut tf: BTreeMap<&str, usize> = BTreeMap::new();
            for token in tokens {
                *tf.entry(token.as_str()).or_default() += 1;
            }
            tf.into_iter()
                .map(|(token, count)| {
                    let df = doc_freq.get(token).copied().unwrap_or(0) as f64;
                    let idf = ((n_docs + 1.0) / (df + 1.0)).ln() + 1.0;
                    (token.to_string(), count as f64 * idf)
                })
                .collect()
        })
        .collect();

    let n = vectors.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let sim = sparse_cosine(&vectors[i], &vectors[j]);
            matrix[i][j] = sim;
            matrix[j][i] = sim;
        }
    }
    matrix
}

fn sparse_cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot: f64 = a
        .iter()
        .filter_map(|(k, va)| b.get(k).map(|vb| va * vb))
        .sum();
    let mag_a = a.values().map(|v| v * v).sum::<f64>().sqrt();
    let mag_b = b.values().map(|v| v * v).sum::<f64>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a * mag_b)
}
