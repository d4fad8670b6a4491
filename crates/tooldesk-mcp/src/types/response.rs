//! Tool listing and tool result types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One block of tool output. Only text is produced; the tag leaves room for more kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ToolContent {
    #[serde(rename = "text")]
    Text { text: String },
}

impl ToolContent {
    pub fn text(&self) -> &str {
        match self {
            ToolContent::Text { text } => text,
        }
    }
}

/// Outcome of a single tool invocation.
///
/// On the wire this is `{ "isError": bool, "content": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireToolResult", from = "WireToolResult")]
pub enum ToolCallResult {
    Success(Vec<ToolContent>),
    Failure(String),
}

#[derive(Serialize, Deserialize)]
struct WireToolResult {
    #[serde(default, rename = "isError")]
    is_error: bool,
    #[serde(default)]
    content: Vec<ToolContent>,
}

impl From<ToolCallResult> for WireToolResult {
    fn from(result: ToolCallResult) -> Self {
        match result {
            ToolCallResult::Success(content) => Self {
                is_error: false,
                content,
            },
            ToolCallResult::Failure(message) => Self {
                is_error: true,
                content: vec![ToolContent::Text { text: message }],
            },
        }
    }
}

impl From<WireToolResult> for ToolCallResult {
    fn from(wire: WireToolResult) -> Self {
        if wire.is_error {
            let message = wire
                .content
                .iter()
                .map(ToolContent::text)
                .collect::<Vec<_>>()
                .join("\n");
            ToolCallResult::Failure(message)
        } else {
            ToolCallResult::Success(wire.content)
        }
    }
}

impl ToolCallResult {
    pub fn text(text: impl Into<String>) -> Self {
        ToolCallResult::Success(vec![ToolContent::Text { text: text.into() }])
    }

    /// Strings pass through untouched; anything else becomes compact JSON text.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self::text(s),
            other => Self::text(other.to_string()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ToolCallResult::Failure(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ToolCallResult::Failure(_))
    }

    /// All text of the result, blocks joined by newlines.
    pub fn joined_text(&self) -> String {
        match self {
            ToolCallResult::Success(content) => content
                .iter()
                .map(ToolContent::text)
                .collect::<Vec<_>>()
                .join("\n"),
            ToolCallResult::Failure(message) => message.clone(),
        }
    }
}

/// Tool descriptor as advertised by `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolListResult {
    pub tools: Vec<ToolDefinition>,
    #[serde(default, rename = "nextCursor", skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}
