//! TF-IDF vectorization and cosine similarity
//!
//! Weighting follows the classic smoothed scheme:
//! - tokens: lowercase runs of two or more word characters, stopwords removed
//! - vocabulary: every remaining term, capped to the `max_features` most
//!   frequent across the corpus (ties broken alphabetically)
//! - idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! - weight = raw term count * idf, each row L2-normalized
//!
//! The vector space is rebuilt for every call and never persisted.

use regex::Regex;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::{RagError, Result};

/// Tokens of at least two word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Sparse, L2-normalized term-weight vector sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            if a_idx == b_idx {
                sum += a_w * b_w;
                i += 1;
                j += 1;
            } else if a_idx < b_idx {
                i += 1;
            } else {
                j += 1;
            }
        }
        sum
    }
}

/// Cosine similarity of two non-negative vectors, in [0, 1].
///
/// A zero vector on either side yields 0.0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    let sim = a.dot(b) / denom;
    if sim.is_nan() {
        0.0
    } else {
        sim.clamp(0.0, 1.0)
    }
}

/// Fitted vector space: vocabulary plus one row per input text
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<SparseVector>,
}

impl TfidfMatrix {
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// Cosine similarity of row 0 against every other row
    pub fn similarities_to_first(&self) -> Vec<f64> {
        match self.rows.split_first() {
            Some((first, rest)) => rest.iter().map(|row| cosine_similarity(first, row)).collect(),
            None => Vec::new(),
        }
    }
}

/// TF-IDF vectorizer with a stopword list and vocabulary cap
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    stopwords: HashSet<String>,
    max_features: usize,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    pub fn new(stopwords: HashSet<String>, max_features: usize) -> Result<Self> {
        let token_pattern = Regex::new(TOKEN_PATTERN).map_err(|e| RagError::InvalidPattern {
            pattern: TOKEN_PATTERN.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            stopwords,
            max_features,
            token_pattern,
        })
    }

    /// Lowercased tokens with stopwords removed
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_pattern
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|token| !self.stopwords.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Build the vector space over `corpus` and weight every entry.
    ///
    /// Fails with [`RagError::EmptyVocabulary`] when no entry contains a
    /// single indexable term.
    pub fn fit_transform(&self, corpus: &[&str]) -> Result<TfidfMatrix> {
        let counts: Vec<HashMap<String, usize>> = corpus
            .iter()
            .map(|text| {
                let mut tf = HashMap::new();
                for token in self.tokenize(text) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let mut corpus_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for tf in &counts {
            for (term, count) in tf {
                *corpus_freq.entry(term.as_str()).or_insert(0) += count;
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_freq.is_empty() {
            return Err(RagError::EmptyVocabulary {
                documents: corpus.len(),
            });
        }

        let vocabulary = self.select_vocabulary(&corpus_freq);
        let index: HashMap<&str, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i))
            .collect();

        let n = corpus.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut entries: Vec<(usize, f64)> = tf
                    .iter()
                    .filter_map(|(term, count)| {
                        index
                            .get(term.as_str())
                            .map(|&i| (i, *count as f64 * idf[i]))
                    })
                    .collect();
                entries.sort_by_key(|(i, _)| *i);

                let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
                if norm > 0.0 {
                    for (_, w) in entries.iter_mut() {
                        *w /= norm;
                    }
                }
                SparseVector { entries }
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }

    /// Alphabetical vocabulary, limited to the most frequent terms
    fn select_vocabulary(&self, corpus_freq: &BTreeMap<&str, usize>) -> Vec<String> {
        let mut terms: Vec<(&str, usize)> = corpus_freq.iter().map(|(t, c)| (*t, *c)).collect();

        if terms.len() > self.max_features {
            // Stable sort over alphabetical input keeps ties alphabetical
            terms.sort_by(|a, b| b.1.cmp(&a.1));
            terms.truncate(self.max_features);
            terms.sort_by(|a, b| a.0.cmp(b.0));
        }

        terms.into_iter().map(|(t, _)| t.to_string()).collect()
    }
}
