//! Tool registry with JSON schemas
//!
//! Tools:
//! - retrieve_similar_reports: rank reference reports against a query

use crate::rag::pipeline::DEFAULT_TOP_K;
use crate::tools::types::ToolSchema;
use serde_json::json;
use std::collections::HashMap;

/// Name under which the retriever is exposed
pub const RETRIEVE_TOOL_NAME: &str = "retrieve_similar_reports";

/// Tool registry
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    /// Map of tool name to schema
    tools: HashMap<String, ToolSchema>,
}

impl ToolRegistry {
    /// Create new tool registry with all tools
    pub fn new() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };

        registry.register_retrieve_similar_reports();

        registry
    }

    /// Schema of the report retrieval tool
    pub fn retrieve_schema() -> ToolSchema {
        ToolSchema::new(
            RETRIEVE_TOOL_NAME,
            "Retrieves similar medical reports from the knowledge base \
             to use as reference when generating a new report.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The query to search for similar reports."
                    },
                    "report_type": {
                        "type": "string",
                        "description": "The type of report to retrieve (e.g., 'hepatique', 'prostate', or 'all')."
                    },
                    "top_k": {
                        "type": "integer",
                        "description": "Number of reports to retrieve (default: 3).",
                        "default": DEFAULT_TOP_K
                    }
                },
                "required": ["query", "report_type"]
            }),
            true, // Read-only
        )
    }

    fn register_retrieve_similar_reports(&mut self) {
        self.tools
            .insert(RETRIEVE_TOOL_NAME.to_string(), Self::retrieve_schema());
    }

    /// Get tool schema by name
    pub fn get(&self, name: &str) -> Option<&ToolSchema> {
        self.tools.get(name)
    }

    /// Check if tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
