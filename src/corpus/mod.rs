// Reference report corpus
//
// Components:
// - Loader: directory enumeration, parsing and the per-path report cache
// - Filter: category narrowing

pub mod filter;
pub mod loader;

pub use filter::{available_categories, filter_by_category, is_wildcard};
pub use loader::{CorpusStatus, KnowledgeBase, LoadReport, SkipReason, SkippedFile};
