//! `retrieve_similar_reports` tool
//!
//! Accepts JSON arguments from an agent pipeline and answers with the
//! formatted reference block. Bad arguments yield a failed `ToolResult`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::errors::{RagError, Result};
use crate::rag::pipeline::{ReportRetriever, DEFAULT_TOP_K};
use crate::tools::registry::{ToolRegistry, RETRIEVE_TOOL_NAME};
use crate::tools::types::{ToolResult, ToolSchema};

fn default_top_k() -> i64 {
    DEFAULT_TOP_K as i64
}

/// Arguments of `retrieve_similar_reports`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveReportsInput {
    /// The query to search for similar reports
    pub query: String,
    /// Report type to retrieve, or `all`
    pub report_type: String,
    /// Number of reports to retrieve; zero or negative returns none
    #[serde(default = "default_top_k")]
    pub top_k: i64,
}

impl RetrieveReportsInput {
    /// Parse tool-call arguments
    pub fn from_value(args: serde_json::Value) -> Result<Self> {
        serde_json::from_value(args).map_err(|e| RagError::InvalidToolInput(e.to_string()))
    }

    /// `top_k` clamped to a usable count
    pub fn limit(&self) -> usize {
        usize::try_from(self.top_k).unwrap_or(0)
    }
}

/// Report retriever exposed as an agent tool
pub struct RetrieveReportsTool {
    retriever: Arc<ReportRetriever>,
}

impl RetrieveReportsTool {
    pub fn new(retriever: Arc<ReportRetriever>) -> Self {
        Self { retriever }
    }

    pub fn name(&self) -> &'static str {
        RETRIEVE_TOOL_NAME
    }

    pub fn schema(&self) -> ToolSchema {
        ToolRegistry::retrieve_schema()
    }

    /// Run with typed input
    pub fn run(&self, input: &RetrieveReportsInput) -> String {
        self.retriever
            .retrieve(&input.query, &input.report_type, input.limit())
    }

    /// Run with raw JSON arguments
    pub fn invoke(&self, args: serde_json::Value) -> ToolResult {
        let start = Instant::now();

        match RetrieveReportsInput::from_value(args) {
            Ok(input) => {
                debug!(
                    query = %input.query,
                    report_type = %input.report_type,
                    top_k = input.top_k,
                    "tool invoked"
                );
                let output = self.run(&input);
                ToolResult::success(self.name().to_string(), output, start.elapsed())
            }
            Err(e) => ToolResult::failure(self.name().to_string(), e.to_string(), start.elapsed()),
        }
    }
}
