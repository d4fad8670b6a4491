//! tooldesk: in-memory support desk and shop stores exposed as MCP tools.

pub mod commerce;
pub mod support;
pub mod types;

pub use commerce::Shop;
pub use support::{StatusChange, SupportDesk};
pub use types::*;
