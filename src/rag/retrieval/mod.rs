// Retrieval engine module
pub mod engine;

pub use engine::{CategoryCount, RetrievalEngine, RetrievalOutcome};
