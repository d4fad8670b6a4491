//! The canonical tool sets, one per store.
//!
//! A server serves exactly one of these. They are never merged.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tooldesk::{Shop, SupportDesk};

use crate::types::{McpError, McpResult, ToolDefinition};

use super::dispatcher::{Dispatcher, ToolService};
use super::registry::ToolRegistry;
use super::{
    add_comment, add_customer, create_ticket, echo, get_customer, get_orders, get_user_profile,
    list_open_tickets, list_products, place_order, process_csv, search_tickets,
    update_ticket_status,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Toolset {
    /// IT support desk: tickets and user profiles.
    Support,
    /// Shop: customers and orders.
    Commerce,
    /// Echo and CSV demo tools.
    Demo,
}

impl Toolset {
    pub const ALL: [Toolset; 3] = [Toolset::Support, Toolset::Commerce, Toolset::Demo];

    pub fn name(&self) -> &'static str {
        match self {
            Toolset::Support => "support",
            Toolset::Commerce => "commerce",
            Toolset::Demo => "demo",
        }
    }

    /// Build the registry over a freshly seeded store.
    pub fn service(&self) -> McpResult<Arc<dyn ToolService>> {
        let service: Arc<dyn ToolService> = match self {
            Toolset::Support => {
                Arc::new(Dispatcher::new(support_registry()?, SupportDesk::seeded()))
            }
            Toolset::Commerce => Arc::new(Dispatcher::new(commerce_registry()?, Shop::seeded())),
            Toolset::Demo => Arc::new(Dispatcher::new(demo_registry()?, ())),
        };
        tracing::info!("Tool set '{}' ready", self.name());
        Ok(service)
    }

    pub fn definitions(&self) -> McpResult<Vec<ToolDefinition>> {
        Ok(match self {
            Toolset::Support => support_registry()?.definitions(),
            Toolset::Commerce => commerce_registry()?.definitions(),
            Toolset::Demo => demo_registry()?.definitions(),
        })
    }
}

impl fmt::Display for Toolset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Toolset {
    type Err = McpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Toolset::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                McpError::InvalidParams(format!(
                    "Unknown tool set '{s}'. Use one of: support, commerce, demo"
                ))
            })
    }
}

pub fn support_registry() -> McpResult<ToolRegistry<SupportDesk>> {
    let mut registry = ToolRegistry::new();
    registry.register(search_tickets::descriptor(), search_tickets::execute)?;
    registry.register(create_ticket::descriptor(), create_ticket::execute)?;
    registry.register(update_ticket_status::descriptor(), update_ticket_status::execute)?;
    registry.register(list_open_tickets::descriptor(), list_open_tickets::execute)?;
    registry.register(add_comment::descriptor(), add_comment::execute)?;
    registry.register(get_user_profile::descriptor(), get_user_profile::execute)?;
    Ok(registry)
}

pub fn commerce_registry() -> McpResult<ToolRegistry<Shop>> {
    let mut registry = ToolRegistry::new();
    registry.register(get_orders::descriptor(), get_orders::execute)?;
    registry.register(add_customer::descriptor(), add_customer::execute)?;
    registry.register(get_customer::descriptor(), get_customer::execute)?;
    registry.register(list_products::descriptor(), list_products::execute)?;
    registry.register(place_order::descriptor(), place_order::execute)?;
    Ok(registry)
}

pub fn demo_registry() -> McpResult<ToolRegistry<()>> {
    let mut registry = ToolRegistry::new();
    registry.register(echo::descriptor(), echo::execute)?;
    registry.register(process_csv::descriptor(), process_csv::execute)?;
    Ok(registry)
}
