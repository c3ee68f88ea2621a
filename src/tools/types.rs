//! Tool call types
//!
//! Results and schemas exchanged with the agent pipeline that calls the
//! retriever as a tool.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Result of a tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool name that was executed
    pub tool: String,

    /// Text handed back to the caller
    pub output: String,

    /// Whether execution was successful
    pub success: bool,

    /// Execution duration in milliseconds
    pub duration_ms: u64,

    /// Optional error message if failed
    pub error: Option<String>,
}

impl ToolResult {
    /// Create successful result
    pub fn success(tool: String, output: String, duration: Duration) -> Self {
        Self {
            tool,
            output,
            success: true,
            duration_ms: duration.as_millis() as u64,
            error: None,
        }
    }

    /// Create failed result
    pub fn failure(tool: String, error: String, duration: Duration) -> Self {
        Self {
            tool,
            output: String::new(),
            success: false,
            duration_ms: duration.as_millis() as u64,
            error: Some(error),
        }
    }
}

/// Tool schema definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,

    /// Tool description
    pub description: String,

    /// Parameter schema (JSON Schema)
    pub parameters: serde_json::Value,

    /// Whether tool is read-only
    pub read_only: bool,
}

impl ToolSchema {
    /// Create new tool schema
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
        read_only: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
            read_only,
        }
    }

    /// Names of required parameters
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success(
            "test".to_string(),
            "output".to_string(),
            Duration::from_millis(100),
        );

        assert!(result.success);
        assert_eq!(result.tool, "test");
        assert_eq!(result.output, "output");
        assert_eq!(result.duration_ms, 100);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure(
            "test".to_string(),
            "error".to_string(),
            Duration::from_millis(50),
        );

        assert!(!result.success);
        assert_eq!(result.error.unwrap(), "error");
        assert!(result.output.is_empty());
    }

    #[test]
    fn test_tool_schema_required() {
        let schema = ToolSchema::new(
            "test_tool",
            "A test tool",
            serde_json::json!({"type": "object", "required": ["query"]}),
            true,
        );

        assert_eq!(schema.name, "test_tool");
        assert_eq!(schema.required(), vec!["query"]);
        assert!(schema.read_only);
    }
}
