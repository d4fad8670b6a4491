//! Error types and JSON-RPC error codes for the MCP server.

use super::message::{JsonRpcError, JsonRpcErrorObject, RequestId, JSONRPC_VERSION};

/// Standard JSON-RPC 2.0 error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-specific error codes.
pub mod mcp_error_codes {
    /// Server: Unauthorized (missing or invalid bearer token).
    pub const UNAUTHORIZED: i32 = -32900;
}

/// Protocol, transport, and wiring errors.
///
/// Tool failures never show up here; see [`ToolError`].
#[derive(thiserror::Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    /// A tool name was registered twice. Only raised while wiring a registry.
    #[error("Duplicate tool registration: {0}")]
    DuplicateTool(String),

    #[error("Transport error: {0}")]
    Transport(String),

    /// The peer answered with a JSON-RPC error object.
    #[error("Remote error {code}: {message}")]
    Remote { code: i32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unauthorized: missing or invalid bearer token.
    #[error("Unauthorized")]
    Unauthorized,
}

impl McpError {
    pub fn code(&self) -> i32 {
        use error_codes::*;
        use mcp_error_codes::*;
        match self {
            McpError::ParseError(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::InternalError(_) | McpError::DuplicateTool(_) => INTERNAL_ERROR,
            McpError::Transport(_) | McpError::Io(_) => INTERNAL_ERROR,
            McpError::Remote { code, .. } => *code,
            McpError::Json(_) => PARSE_ERROR,
            McpError::Unauthorized => UNAUTHORIZED,
        }
    }

    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            error: JsonRpcErrorObject {
                code: self.code(),
                message: self.to_string(),
                data: None,
            },
        }
    }
}

pub type McpResult<T> = Result<T, McpError>;

/// Everything that can go wrong inside a single tool invocation.
///
/// The dispatcher folds every variant into a failed [`ToolCallResult`](super::ToolCallResult)
/// using its `Display` text, so the messages are what a model or user reads.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("{0} is required")]
    MissingArgument(String),

    /// A well-typed argument whose value the tool rejects.
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Arguments that are not an object or do not fit the tool's parameter types.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("{0}")]
    Domain(#[from] tooldesk::DeskError),
}

/// What a tool handler returns: a JSON payload or a failure.
pub type ToolOutcome = Result<serde_json::Value, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages() {
        assert_eq!(
            ToolError::UnknownTool("missing".to_string()).to_string(),
            "Unknown tool: missing"
        );
        assert_eq!(
            ToolError::MissingArgument("message".to_string()).to_string(),
            "message is required"
        );
        let domain: ToolError = tooldesk::DeskError::CustomerNotFound(7).into();
        assert_eq!(domain.to_string(), "No customer found with id: 7");
    }

    #[test]
    fn test_remote_error_keeps_code() {
        let err = McpError::Remote {
            code: -32601,
            message: "Method not found: nope".to_string(),
        };
        assert_eq!(err.code(), -32601);
    }

    #[test]
    fn test_json_rpc_error_shape() {
        let err = McpError::MethodNotFound("foo".to_string());
        let rpc = err.to_json_rpc_error(RequestId::Number(4));
        let value = serde_json::to_value(rpc).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["error"]["code"], -32601);
        assert_eq!(value["error"]["message"], "Method not found: foo");
    }
}
