//! Error types for reportrag
//!
//! Corpus faults and degenerate rankings are reported as outcome values,
//! not errors. `RagError` covers the remaining fallible edges: configuration,
//! filename patterns, vectorization and tool input.

use thiserror::Error;

/// Main error type for the retrieval core
#[derive(Error, Debug)]
pub enum RagError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Vocabulary is empty once stopwords are removed
    #[error("Empty vocabulary: {documents} documents contain no indexable terms")]
    EmptyVocabulary { documents: usize },

    /// Filename rule failed to compile
    #[error("Invalid filename pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Malformed tool-call arguments
    #[error("Invalid tool input: {0}")]
    InvalidToolInput(String),

    /// Generic errors with context
    #[error("Retrieval error: {0}")]
    Generic(String),
}

/// Result type alias for retrieval operations
pub type Result<T> = std::result::Result<T, RagError>;

/// Convert anyhow errors to RagError
impl From<anyhow::Error> for RagError {
    fn from(err: anyhow::Error) -> Self {
        RagError::Generic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RagError::EmptyVocabulary { documents: 4 };
        assert!(err.to_string().contains("4 documents"));
    }

    #[test]
    fn test_invalid_pattern_error() {
        let err = RagError::InvalidPattern {
            pattern: "^irm_(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains("^irm_("));
        assert!(err.to_string().contains("unclosed group"));
    }

    #[test]
    fn test_from_anyhow() {
        let err: RagError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, RagError::Generic(ref msg) if msg == "boom"));
    }
}
