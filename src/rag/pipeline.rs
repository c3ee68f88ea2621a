// End-to-end retrieval: corpus -> category filter -> ranking -> formatted text
use std::sync::Arc;

use crate::config::Config;
use crate::corpus::KnowledgeBase;
use crate::errors::Result;
use crate::rag::context::ResultFormatter;
use crate::rag::reranking::SimilarityRanker;
use crate::rag::retrieval::{CategoryCount, RetrievalEngine, RetrievalOutcome};

/// Default number of reports returned
pub const DEFAULT_TOP_K: usize = 3;

/// Reference report retriever used by report generation pipelines.
///
/// Build it once and share it: the knowledge base cache lives as long as the
/// retriever and is only dropped by [`ReportRetriever::reset_cache`].
pub struct ReportRetriever {
    engine: RetrievalEngine,
    formatter: ResultFormatter,
    default_top_k: usize,
}

impl ReportRetriever {
    /// Create new retriever
    pub fn new(engine: RetrievalEngine) -> Self {
        Self {
            engine,
            formatter: ResultFormatter::new(),
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Create from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut retriever = Self::new(RetrievalEngine::from_config(config)?);
        retriever.default_top_k = config.retrieval.default_top_k;
        Ok(retriever)
    }

    /// Create over a knowledge base directory with default settings
    pub fn open(root: impl Into<std::path::PathBuf>) -> Result<Self> {
        let mut config = Config::default();
        config.knowledge.path = root.into().to_string_lossy().into_owned();
        Self::from_config(&config)
    }

    /// Create over an existing, possibly shared, knowledge base
    pub fn with_knowledge_base(knowledge_base: Arc<KnowledgeBase>, max_features: usize) -> Result<Self> {
        let ranker = SimilarityRanker::new(max_features)?;
        Ok(Self::new(RetrievalEngine::new(knowledge_base, ranker)))
    }

    /// Retrieve the `top_k` most similar reports of `category` as text
    pub fn retrieve(&self, query: &str, category: &str, top_k: usize) -> String {
        let outcome = self.engine.retrieve(query, category);
        self.formatter.format(&outcome, top_k)
    }

    /// Retrieve with the configured default `top_k`
    pub fn retrieve_default(&self, query: &str, category: &str) -> String {
        self.retrieve(query, category, self.default_top_k)
    }

    /// Structured outcome, full ranking without truncation
    pub fn retrieve_detailed(&self, query: &str, category: &str) -> RetrievalOutcome {
        self.engine.retrieve(query, category)
    }

    /// Categories present in the knowledge base
    pub fn categories(&self) -> Vec<CategoryCount> {
        self.engine.categories()
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub fn knowledge_base(&self) -> &Arc<KnowledgeBase> {
        self.engine.knowledge_base()
    }

    /// Forget every cached report
    pub fn reset_cache(&self) {
        self.engine.knowledge_base().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_from_config_uses_default_top_k() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.knowledge.path = dir.path().to_string_lossy().into_owned();
        config.retrieval.default_top_k = 1;

        fs::write(dir.path().join("irm_hepatique_01.txt"), "Conclusion: kyste\n").unwrap();
        fs::write(dir.path().join("irm_hepatique_02.txt"), "Conclusion: angiome\n").unwrap();

        let retriever = ReportRetriever::from_config(&config).unwrap();
        let text = retriever.retrieve_default("kyste", "hepatique");

        assert!(text.starts_with("Retrieved 1 similar reports"));
        assert!(text.contains("irm_hepatique_01.txt"));
    }

    #[test]
    fn test_open_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let retriever = ReportRetriever::open(dir.path().join("absent")).unwrap();

        assert_eq!(
            retriever.retrieve("kyste", "hepatique", 3),
            "No reports found for type: hepatique. Available types: "
        );
    }

    #[test]
    fn test_shared_knowledge_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("irm_prostate.txt"), "Conclusion: adénome\n").unwrap();

        let kb = Arc::new(KnowledgeBase::new(dir.path(), "txt", "irm").unwrap());
        let first = ReportRetriever::with_knowledge_base(Arc::clone(&kb), 5000).unwrap();
        let second = ReportRetriever::with_knowledge_base(Arc::clone(&kb), 5000).unwrap();

        first.retrieve("adénome", "all", 3);
        assert_eq!(kb.cached_len(), 1);

        second.reset_cache();
        assert_eq!(kb.cached_len(), 0);
    }
}
