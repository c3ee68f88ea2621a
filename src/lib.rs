//! reportrag v0.5.0 - Reference Report Retrieval
//!
//! Retrieves the reference radiology reports most similar to a free-text
//! query, so a report generator can condition on them.
//!
//! # Architecture
//!
//! - **report**: section parsing + category extraction from filenames
//! - **corpus**: cached knowledge base loading + category filtering
//! - **rag**: TF-IDF vectorizer, similarity ranking, result formatting
//! - **tools**: `retrieve_similar_reports` tool-call surface
//! - **cli / config / telemetry**: command line, TOML settings, tracing

pub mod errors;
pub mod report;
pub mod corpus;
pub mod rag;
pub mod tools;

// Re-export commonly used types
pub use errors::{RagError, Result};
pub use rag::{ReportRetriever, RetrievalOutcome};
pub use report::{ReportDocument, Section, SectionMap};

// Interface layer
pub mod cli;
pub mod config;
pub mod telemetry;
