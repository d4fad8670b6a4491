//! tooldesk MCP server: a fixed tool registry exposed over JSON-RPC.
//!
//! One process serves one tool set (`support`, `commerce`, or `demo`) over
//! stdio or HTTP. [`ClientSession`] drives any such server from the other end.

pub mod config;
pub mod protocol;
pub mod repl;
pub mod session;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_addr, resolve_token, resolve_toolset};
pub use protocol::ProtocolHandler;
pub use session::ClientSession;
pub use tools::{Dispatcher, ToolRegistry, ToolService, Toolset};
pub use transport::StdioTransport;
