// Similarity ranking of reference reports against a free-text query
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::Result;
use crate::rag::stopwords::french_stopwords;
use crate::rag::vectorizer::TfidfVectorizer;
use crate::report::ReportDocument;

/// Default vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 5000;

/// How a ranking call ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankingStatus {
    /// Similarities computed from the vector space
    Scored,
    /// No document had text to compare; every score is 0.0
    NoComparableDocuments,
    /// Vectorization failed; every score is 0.0
    Degenerate(String),
}

/// Report annotated with its similarity to the query
#[derive(Debug, Clone)]
pub struct RankedDocument {
    pub document: Arc<ReportDocument>,
    /// Cosine similarity in [0, 1]
    pub similarity: f64,
    /// False when the report had no text and was left out of the vector space
    pub vectorized: bool,
}

/// Ranked reports plus the ranking status
#[derive(Debug, Clone)]
pub struct RankingOutcome {
    pub ranked: Vec<RankedDocument>,
    pub status: RankingStatus,
}

/// TF-IDF + cosine similarity ranker
pub struct SimilarityRanker {
    vectorizer: TfidfVectorizer,
}

impl SimilarityRanker {
    /// Create a ranker with the French stopword list
    pub fn new(max_features: usize) -> Result<Self> {
        Ok(Self {
            vectorizer: TfidfVectorizer::new(french_stopwords(), max_features)?,
        })
    }

    /// Create with a custom vectorizer
    pub fn with_vectorizer(vectorizer: TfidfVectorizer) -> Self {
        Self { vectorizer }
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    /// Score every report against `query` and sort by descending similarity.
    ///
    /// Never fails: reports without text, an empty input or a degenerate
    /// vocabulary all fall back to 0.0 scores. Equal scores keep input order,
    /// except that reports left out of the vector space go after the others.
    pub fn rank(&self, query: &str, documents: &[Arc<ReportDocument>]) -> RankingOutcome {
        let flattened: Vec<String> = documents.iter().map(|doc| doc.flattened_text()).collect();

        let mut ranked: Vec<RankedDocument> = documents
            .iter()
            .zip(&flattened)
            .map(|(doc, text)| RankedDocument {
                document: Arc::clone(doc),
                similarity: 0.0,
                vectorized: !text.is_empty(),
            })
            .collect();

        let valid: Vec<usize> = (0..ranked.len()).filter(|&i| ranked[i].vectorized).collect();

        let status = if valid.is_empty() {
            RankingStatus::NoComparableDocuments
        } else {
            // Query first, then each report with text, in input order
            let mut corpus: Vec<&str> = Vec::with_capacity(valid.len() + 1);
            corpus.push(query);
            corpus.extend(valid.iter().map(|&i| flattened[i].as_str()));

            match self.vectorizer.fit_transform(&corpus) {
                Ok(matrix) => {
                    for (&i, similarity) in valid.iter().zip(matrix.similarities_to_first()) {
                        ranked[i].similarity = similarity;
                    }
                    debug!(
                        documents = valid.len(),
                        vocabulary = matrix.vocabulary().len(),
                        "similarities computed"
                    );
                    RankingStatus::Scored
                }
                Err(e) => {
                    warn!(error = %e, "similarity computation failed, scoring all reports 0.0");
                    RankingStatus::Degenerate(e.to_string())
                }
            }
        };

        // Vec::sort_by is stable
        ranked.sort_by(compare_ranked);

        RankingOutcome { ranked, status }
    }
}

fn compare_ranked(a: &RankedDocument, b: &RankedDocument) -> Ordering {
    b.similarity
        .partial_cmp(&a.similarity)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.vectorized.cmp(&a.vectorized))
}
