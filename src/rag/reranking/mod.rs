// Similarity ranking module
pub mod scorer;

pub use scorer::{RankedDocument, RankingOutcome, RankingStatus, SimilarityRanker, DEFAULT_MAX_FEATURES};
