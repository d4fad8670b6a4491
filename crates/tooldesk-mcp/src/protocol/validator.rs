//! JSON-RPC message validation.

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Validate that a JSON-RPC request is well-formed.
pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "Expected jsonrpc version \"{JSONRPC_VERSION}\", got \"{}\"",
            request.jsonrpc
        )));
    }

    if request.method.trim().is_empty() {
        return Err(McpError::InvalidRequest(
            "Method name must not be empty".to_string(),
        ));
    }

    if let Some(params) = &request.params {
        if !(params.is_object() || params.is_array() || params.is_null()) {
            return Err(McpError::InvalidRequest(
                "params must be an object or an array".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RequestId;
    use serde_json::json;

    #[test]
    fn test_rejects_wrong_version_and_scalar_params() {
        let mut req = JsonRpcRequest::new(RequestId::Number(1), "ping", None);
        assert!(validate_request(&req).is_ok());

        req.jsonrpc = "1.0".to_string();
        assert_eq!(validate_request(&req).unwrap_err().code(), -32600);

        let req = JsonRpcRequest::new(RequestId::Number(2), "tools/call", Some(json!(5)));
        assert!(validate_request(&req).is_err());

        let req = JsonRpcRequest::new(RequestId::Number(3), " ", None);
        assert!(validate_request(&req).is_err());
    }
}
