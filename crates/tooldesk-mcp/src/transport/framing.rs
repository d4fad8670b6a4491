//! Message framing for newline-delimited JSON.

use crate::types::{JsonRpcMessage, McpError, McpResult};

/// Parse a single line of text as a JSON-RPC message.
pub fn parse_message(line: &str) -> McpResult<JsonRpcMessage> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(McpError::ParseError("Empty message".to_string()));
    }

    serde_json::from_str(trimmed).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Serialize any message to a JSON line (with trailing newline).
pub fn frame_message<T: serde::Serialize>(message: &T) -> McpResult<String> {
    let mut json = serde_json::to_string(message).map_err(McpError::Json)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_errors_are_parse_errors() {
        assert_eq!(parse_message("   ").unwrap_err().code(), -32700);
        assert_eq!(parse_message(r#"{"broken":"#).unwrap_err().code(), -32700);
        assert_eq!(parse_message("hello").unwrap_err().code(), -32700);
    }

    #[test]
    fn test_frame_is_single_line() {
        let framed = frame_message(&json!({"a": "multi\nline"})).unwrap();
        assert!(framed.ends_with('\n'));
        assert_eq!(framed.matches('\n').count(), 1);
    }
}
