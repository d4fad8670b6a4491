//! A minimal MCP client session over newline-delimited JSON-RPC.
//!
//! Used by the integration tests and handy for scripting a server that runs
//! as a child process. One request is in flight at a time.

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::transport::framing;
use crate::types::{
    InitializeParams, InitializeResult, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest,
    McpError, McpResult, RequestId, ToolCallParams, ToolCallResult, ToolDefinition,
    ToolListResult,
};

pub struct ClientSession<R, W> {
    reader: R,
    writer: W,
    next_id: i64,
}

impl<R, W> ClientSession<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            next_id: 1,
        }
    }

    /// Send `initialize`, then the `notifications/initialized` notification.
    pub async fn initialize(
        &mut self,
        client_name: &str,
        client_version: &str,
    ) -> McpResult<InitializeResult> {
        let params = serde_json::to_value(InitializeParams::new(client_name, client_version))?;
        let result = self.request("initialize", Some(params)).await?;
        let result: InitializeResult = serde_json::from_value(result)?;

        self.notify("notifications/initialized", None).await?;
        tracing::debug!(
            "Initialized against {} v{}",
            result.server_info.name,
            result.server_info.version
        );
        Ok(result)
    }

    pub async fn list_tools(&mut self) -> McpResult<Vec<ToolDefinition>> {
        let result = self.request("tools/list", None).await?;
        let list: ToolListResult = serde_json::from_value(result)?;
        Ok(list.tools)
    }

    /// Call a tool. A tool-level failure is `Ok(ToolCallResult::Failure(..))`;
    /// only protocol and transport problems are `Err`.
    pub async fn call_tool(
        &mut self,
        name: &str,
        arguments: Option<Value>,
    ) -> McpResult<ToolCallResult> {
        let params = serde_json::to_value(ToolCallParams {
            name: name.to_string(),
            arguments,
        })?;
        let result = self.request("tools/call", Some(params)).await?;
        Ok(serde_json::from_value(result)?)
    }

    pub async fn ping(&mut self) -> McpResult<()> {
        self.request("ping", None).await.map(|_| ())
    }

    pub async fn notify(&mut self, method: &str, params: Option<Value>) -> McpResult<()> {
        self.send(&JsonRpcNotification::new(method, params)).await
    }

    /// Send a request and wait for the response carrying the same id.
    ///
    /// Blank lines, lines that are not UTF-8 JSON, and server notifications
    /// are skipped.
    pub async fn request(&mut self, method: &str, params: Option<Value>) -> McpResult<Value> {
        let id = RequestId::from(self.next_id);
        self.next_id += 1;

        self.send(&JsonRpcRequest::new(id.clone(), method, params))
            .await?;

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut buf).await?;
            if bytes_read == 0 {
                return Err(McpError::Transport("connection closed".to_string()));
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                tracing::debug!("Skipping line that is not UTF-8");
                continue;
            };
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let msg = match framing::parse_message(trimmed) {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("Skipping unparseable line: {e}");
                    continue;
                }
            };

            match msg {
                JsonRpcMessage::Response(resp) if resp.id == id => return Ok(resp.result),
                JsonRpcMessage::Error(err) if err.id == id => {
                    return Err(McpError::Remote {
                        code: err.error.code,
                        message: err.error.message,
                    })
                }
                JsonRpcMessage::Notification(notif) => {
                    tracing::debug!("Skipping server notification {}", notif.method);
                }
                JsonRpcMessage::Request(req) => {
                    tracing::debug!("Ignoring server request {}", req.method);
                }
                other => {
                    let got = other
                        .response_id()
                        .map(ToString::to_string)
                        .unwrap_or_default();
                    return Err(McpError::Transport(format!(
                        "expected response to request {id}, got one for {got}"
                    )));
                }
            }
        }
    }

    async fn send<T: serde::Serialize>(&mut self, message: &T) -> McpResult<()> {
        let framed = framing::frame_message(message)?;
        self.writer.write_all(framed.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Give back the underlying reader and writer.
    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{duplex, AsyncReadExt, BufReader};

    #[tokio::test]
    async fn test_request_skips_noise_and_matches_id() {
        let (client_end, mut server_end) = duplex(4096);
        let (read_half, write_half) = tokio::io::split(client_end);
        let mut session = ClientSession::new(BufReader::new(read_half), write_half);

        server_end
            .write_all(
                b"\nnot json\n{\"jsonrpc\":\"2.0\",\"method\":\"notifications/message\"}\n\
                  {\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{\"ok\":true}}\n",
            )
            .await
            .unwrap();

        let result = session.request("ping", None).await.unwrap();
        assert_eq!(result, json!({"ok": true}));

        let mut sent = vec![0u8; 256];
        let n = server_end.read(&mut sent).await.unwrap();
        let sent: Value = serde_json::from_slice(&sent[..n]).unwrap();
        assert_eq!(sent["id"], 1);
        assert_eq!(sent["method"], "ping");
    }

    #[tokio::test]
    async fn test_request_skips_lines_that_are_not_utf8() {
        let (client_end, mut server_end) = duplex(4096);
        let (read_half, write_half) = tokio::io::split(client_end);
        let mut session = ClientSession::new(BufReader::new(read_half), write_half);

        server_end
            .write_all(b"\xff\xfe\x00\n{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n")
            .await
            .unwrap();

        let result = session.request("ping", None).await.unwrap();
        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn test_remote_error_and_mismatched_id() {
        let (client_end, mut server_end) = duplex(4096);
        let (read_half, write_half) = tokio::io::split(client_end);
        let mut session = ClientSession::new(BufReader::new(read_half), write_half);

        server_end
            .write_all(
                b"{\"jsonrpc\":\"2.0\",\"id\":1,\"error\":{\"code\":-32601,\"message\":\"Method not found: x\"}}\n\
                  {\"jsonrpc\":\"2.0\",\"id\":99,\"result\":{}}\n",
            )
            .await
            .unwrap();

        let err = session.request("x", None).await.unwrap_err();
        assert!(matches!(err, McpError::Remote { code: -32601, .. }));

        let err = session.request("ping", None).await.unwrap_err();
        assert!(matches!(err, McpError::Transport(ref m) if m.contains("99")));
    }

    #[tokio::test]
    async fn test_eof_is_connection_closed() {
        let (client_end, mut server_end) = duplex(4096);
        server_end.shutdown().await.unwrap();
        let (read_half, write_half) = tokio::io::split(client_end);
        let mut session = ClientSession::new(BufReader::new(read_half), write_half);

        let err = session.request("ping", None).await.unwrap_err();
        assert!(matches!(err, McpError::Transport(ref m) if m == "connection closed"));
    }
}
