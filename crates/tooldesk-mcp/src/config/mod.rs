//! Configuration resolution: CLI flag, then environment, then default.

use crate::tools::Toolset;
use crate::types::McpResult;

pub const TOOLSET_ENV: &str = "TOOLDESK_TOOLSET";
pub const ADDR_ENV: &str = "TOOLDESK_ADDR";
pub const TOKEN_ENV: &str = "TOOLDESK_TOKEN";

pub const DEFAULT_ADDR: &str = "127.0.0.1:8001";

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Resolve which tool set to serve.
///
/// An unparseable `TOOLDESK_TOOLSET` is an error rather than a silent fallback.
pub fn resolve_toolset(explicit: Option<Toolset>) -> McpResult<Toolset> {
    resolve_toolset_with(explicit, env_var)
}

/// Resolve the HTTP listen address.
pub fn resolve_addr(explicit: Option<&str>) -> String {
    resolve_addr_with(explicit, env_var)
}

/// Resolve the bearer token, if any.
pub fn resolve_token(explicit: Option<String>) -> Option<String> {
    resolve_token_with(explicit, env_var)
}

fn resolve_toolset_with(
    explicit: Option<Toolset>,
    env: impl Fn(&str) -> Option<String>,
) -> McpResult<Toolset> {
    if let Some(toolset) = explicit {
        return Ok(toolset);
    }

    match env(TOOLSET_ENV) {
        Some(name) => name.parse(),
        None => Ok(Toolset::Support),
    }
}

fn resolve_addr_with(explicit: Option<&str>, env: impl Fn(&str) -> Option<String>) -> String {
    if let Some(addr) = explicit {
        return addr.to_string();
    }

    env(ADDR_ENV).unwrap_or_else(|| DEFAULT_ADDR.to_string())
}

fn resolve_token_with(
    explicit: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit.or_else(|| env(TOKEN_ENV))
}
