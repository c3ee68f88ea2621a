// Retrieval engine: load corpus -> filter by category -> rank by similarity
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::corpus::{available_categories, filter_by_category, CorpusStatus, KnowledgeBase};
use crate::errors::Result;
use crate::rag::reranking::{RankedDocument, RankingStatus, SimilarityRanker};

/// Outcome of one retrieval call
#[derive(Debug, Clone)]
pub enum RetrievalOutcome {
    /// Reports of the requested category, best match first
    Ranked {
        query: String,
        ranked: Vec<RankedDocument>,
        corpus: CorpusStatus,
        ranking: RankingStatus,
    },
    /// The category filter left nothing to rank
    NoMatchingCategory {
        requested: String,
        available: Vec<String>,
        corpus: CorpusStatus,
    },
}

impl RetrievalOutcome {
    /// Corpus state observed by this call
    pub fn corpus_status(&self) -> &CorpusStatus {
        match self {
            RetrievalOutcome::Ranked { corpus, .. } => corpus,
            RetrievalOutcome::NoMatchingCategory { corpus, .. } => corpus,
        }
    }

    /// Ranked reports; empty when nothing matched the category
    pub fn ranked(&self) -> &[RankedDocument] {
        match self {
            RetrievalOutcome::Ranked { ranked, .. } => ranked,
            RetrievalOutcome::NoMatchingCategory { .. } => &[],
        }
    }
}

/// Summary of the knowledge base contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub documents: usize,
}

/// Retrieval engine over a shared knowledge base
pub struct RetrievalEngine {
    knowledge_base: Arc<KnowledgeBase>,
    ranker: SimilarityRanker,
}

impl RetrievalEngine {
    /// Create new retrieval engine
    pub fn new(knowledge_base: Arc<KnowledgeBase>, ranker: SimilarityRanker) -> Self {
        Self {
            knowledge_base,
            ranker,
        }
    }

    /// Create from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let knowledge_base = Arc::new(KnowledgeBase::from_config(config)?);
        let ranker = SimilarityRanker::new(config.retrieval.max_features)?;
        Ok(Self::new(knowledge_base, ranker))
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        &self.knowledge_base
    }

    /// Rank every report of `category` against `query`
    pub fn retrieve(&self, query: &str, category: &str) -> RetrievalOutcome {
        let load = self.knowledge_base.load();
        let filtered = filter_by_category(&load.documents, category);

        debug!(
            category,
            loaded = load.documents.len(),
            matching = filtered.len(),
            "category filter applied"
        );

        if filtered.is_empty() {
            info!(category, "no reports for requested category");
            return RetrievalOutcome::NoMatchingCategory {
                requested: category.to_string(),
                available: available_categories(&load.documents),
                corpus: load.status,
            };
        }

        let outcome = self.ranker.rank(query, &filtered);

        info!(
            category,
            ranked = outcome.ranked.len(),
            best = outcome.ranked.first().map(|r| r.similarity).unwrap_or(0.0),
            "reports ranked"
        );

        RetrievalOutcome::Ranked {
            query: query.to_string(),
            ranked: outcome.ranked,
            corpus: load.status,
            ranking: outcome.status,
        }
    }

    /// Categories present in the knowledge base with their report counts
    pub fn categories(&self) -> Vec<CategoryCount> {
        let load = self.knowledge_base.load();
        available_categories(&load.documents)
            .into_iter()
            .map(|category| CategoryCount {
                documents: load
                    .documents
                    .iter()
                    .filter(|doc| doc.category == category)
                    .count(),
                category,
            })
            .collect()
    }
}
