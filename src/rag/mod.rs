// Lexical retrieval of reference reports
//
// This module ranks reference reports against a free-text query using
// TF-IDF term weighting and cosine similarity.
//
// Components:
// - Vectorizer: tokenization, stopwords, TF-IDF weights, cosine similarity
// - Re-ranking: score and order reports against the query
// - Retrieval Engine: corpus load + category filter + ranking
// - Context: render the top-K reports as text
// - Pipeline: the `retrieve(query, category, top_k)` entry point

pub mod context;
pub mod pipeline;
pub mod reranking;
pub mod retrieval;
pub mod stopwords;
pub mod vectorizer;

// Re-export key types
pub use context::ResultFormatter;
pub use pipeline::{ReportRetriever, DEFAULT_TOP_K};
pub use reranking::{RankedDocument, RankingStatus, SimilarityRanker};
pub use retrieval::{RetrievalEngine, RetrievalOutcome};
pub use vectorizer::{cosine_similarity, TfidfVectorizer};
