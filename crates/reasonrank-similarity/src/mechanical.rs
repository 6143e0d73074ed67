//! Layer 1: mechanical equivalence
//!
//! Catches restatements that differ only by synonym substitution, stopwords,
//! word order or a negated antonym ("not unintelligent" reads as
//! "intelligent"). Everything here is a pure function of the input text.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Jaccard score at or above which two texts count as the same argument
pub const DEFAULT_MECHANICAL_THRESHOLD: f64 = 0.85;

/// Synonym groups, inflections included
///
/// Every member maps to the lexicographically smallest word of its group, so
/// a word never ends up with two different canonicals.
const SYNONYM_GROUPS: &[&[&str]] = &[
    &[
        "decrease", "decreased", "decreases", "lower", "lowered", "lowers", "reduce", "reduced",
        "reduces",
    ],
    &[
        "hike", "hiked", "increase", "increased", "increases", "raise", "raised", "raises",
    ],
    &["ban", "banned", "bans", "forbid", "prohibit", "prohibited", "prohibits"],
    &["allow", "allowed", "allows", "enable", "enabled", "permit", "permitted", "permits"],
    &["build", "built", "construct", "constructed"],
    &["buy", "bought", "purchase", "purchased"],
    &["end", "ended", "stop", "stopped", "terminate", "terminated"],
    &["fix", "fixed", "repair", "repaired", "resolve", "resolved"],
    &["beneficial", "good"],
    &["bad", "detrimental", "harmful"],
    &["clever", "intelligent", "smart"],
    &["foolish", "stupid", "unintelligent"],
    &["fast", "quick", "rapid"],
    &["slow", "sluggish"],
    &["rich", "wealthy"],
    &["impoverished", "poor"],
    &["accurate", "true"],
    &["false", "inaccurate", "incorrect"],
    &["tax", "taxation", "taxes"],
];

/// Two-word phrases that name a single concept, collapsed before stopwords
const COMPOUND_PHRASES: &[(&str, &str, &str)] = &[
    ("tax", "rate", "tax"),
    ("tax", "rates", "tax"),
    ("taxation", "rate", "tax"),
    ("taxation", "rates", "tax"),
    ("income", "taxes", "tax"),
];

const STOPWORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "shall", "should", "may", "might", "must", "can",
    "could", "not", "no", "nor", "so", "yet", "both", "either", "neither", "for", "and", "but",
    "or", "as", "at", "by", "in", "of", "on", "to", "up", "it", "its", "this", "that", "these",
    "those", "i", "we", "you", "he", "she", "they", "them", "their", "our", "your", "my", "his",
    "her",
];

/// Standalone negations only; prefixes such as "un" or "in" stay part of their word
const NEGATION_WORDS: &[&str] = &["not", "no", "never", "neither", "nor", "without"];

/// Antonym pairs; a later pair overrides an earlier one for the same word
const ANTONYM_PAIRS: &[(&str, &str)] = &[
    ("intelligent", "unintelligent"),
    ("intelligent", "stupid"),
    ("smart", "dumb"),
    ("good", "bad"),
    ("good", "evil"),
    ("true", "false"),
    ("correct", "incorrect"),
    ("honest", "dishonest"),
    ("legal", "illegal"),
    ("moral", "immoral"),
    ("possible", "impossible"),
    ("responsible", "irresponsible"),
    ("relevant", "irrelevant"),
    ("effective", "ineffective"),
    ("efficient", "inefficient"),
    ("logical", "illogical"),
    ("rational", "irrational"),
    ("similar", "dissimilar"),
    ("agree", "disagree"),
    ("like", "dislike"),
    ("trust", "distrust"),
    ("approve", "disapprove"),
];

static CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for group in SYNONYM_GROUPS {
        let Some(canonical) = group.iter().min() else {
            continue;
        };
        for word in group.iter() {
            map.insert(*word, *canonical);
        }
    }
    map
});

static ANTONYMS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (word, opposite) in ANTONYM_PAIRS {
        map.insert(*word, *opposite);
        map.insert(*opposite, *word);
    }
    map
});

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

static NEGATION_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATION_WORDS.iter().copied().collect());

fn canonical(word: &str) -> String {
    CANONICAL.get(word).copied().unwrap_or(word).to_string()
}

fn compound(first: &str, second: &str) -> Option<&'static str> {
    COMPOUND_PHRASES
        .iter()
        .find(|(a, b, _)| *a == first && *b == second)
        .map(|(_, _, replacement)| *replacement)
}

/// Layer 1 of the duplication pipeline
///
/// Stateless; the word tables are built once per process.
#[derive(Debug, Clone, Copy, Default)]
pub struct MechanicalEquivalenceChecker;

impl MechanicalEquivalenceChecker {
    /// Create a checker
    pub fn new() -> Self {
        Self
    }

    /// Strip text down to its load-bearing tokens
    ///
    /// Lowercases, replaces punctuation (apostrophes excepted) with spaces,
    /// collapses negated antonyms and compound phrases, drops stopwords and
    /// canonicalizes synonyms. The result is sorted so word order never
    /// matters.
    ///
    /// ```
    /// use reasonrank_similarity::MechanicalEquivalenceChecker;
    ///
    /// let checker = MechanicalEquivalenceChecker::new();
    /// assert_eq!(checker.normalize("He is not unintelligent."), vec!["clever"]);
    /// ```
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned: String = text
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '_' || c == '\'' || c.is_whitespace() {
                    c
                } else {
                    ' '
                }
            })
            .collect();
        let tokens: Vec<&str> = cleaned.split_whitespace().collect();

        let mut out = Vec::with_capacity(tokens.len());
        let mut i = 0;
        while i < tokens.len() {
            let tok = tokens[i];
            let next = tokens.get(i + 1).copied();

            if let Some(next) = next {
                if NEGATION_SET.contains(tok) {
                    if let Some(antonym) = ANTONYMS.get(next) {
                        out.push(canonical(antonym));
                        i += 2;
                        continue;
                    }
                }
                if let Some(replacement) = compound(tok, next) {
                    out.push(canonical(replacement));
                    i += 2;
                    continue;
                }
            }

            if !STOPWORD_SET.contains(tok) {
                out.push(canonical(tok));
            }
            i += 1;
        }

        out.sort();
        out
    }

    /// Jaccard similarity of the two normalized token sets, in [0, 1]
    ///
    /// Both empty after normalization counts as identical (1.0); exactly one
    /// empty counts as unrelated (0.0).
    pub fn score(&self, text_a: &str, text_b: &str) -> f64 {
        let tokens_a: HashSet<String> = self.normalize(text_a).into_iter().collect();
        let tokens_b: HashSet<String> = self.normalize(text_b).into_iter().collect();

        match (tokens_a.is_empty(), tokens_b.is_empty()) {
            (true, true) => return 1.0,
            (true, false) | (false, true) => return 0.0,
            _ => {}
        }

        let intersection = tokens_a.intersection(&tokens_b).count();
        let union = tokens_a.union(&tokens_b).count();
        intersection as f64 / union as f64
    }

    /// Whether Layer 1 alone marks the texts as the same argument
    pub fn are_mechanically_equivalent(&self, text_a: &str, text_b: &str, threshold: f64) -> bool {
        self.score(text_a, text_b) >= threshold
    }
}
