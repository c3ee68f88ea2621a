//! Tool-call surface
//!
//! Exposes the report retriever to agent pipelines:
//! - JSON argument schema (registry)
//! - typed input and result types
//! - the `retrieve_similar_reports` tool

pub mod registry;
pub mod retrieve;
pub mod types;

// Re-export commonly used types
pub use registry::{ToolRegistry, RETRIEVE_TOOL_NAME};
pub use retrieve::{RetrieveReportsInput, RetrieveReportsTool};
pub use types::{ToolResult, ToolSchema};
