//! Tool `list_open_tickets`: Active tickets, optionally by priority.

use serde::Deserialize;
use serde_json::json;

use tooldesk::{Priority, SupportDesk};

use crate::types::ToolOutcome;

use super::descriptor::{parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};
use super::summaries::ticket_summary;

#[derive(Debug, Deserialize)]
struct ListParams {
    #[serde(default = "default_filter")]
    priority_filter: String,
}

fn default_filter() -> String {
    "all".to_string()
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "list_open_tickets",
        "List all open or in-progress support tickets, optionally filtered by priority. \
         Use priority_filter='all' to see every active ticket. \
         Useful when a user asks 'what tickets are open?' or 'how many high-priority issues exist?'",
    )
    .param(
        ParamSpec::required(
            "priority_filter",
            ParamType::String,
            "Filter by priority. Use 'all' to return every open/in-progress ticket.",
        )
        .with_choices(&["low", "medium", "high", "all"]),
    )
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: ListParams = parse_args(args)?;
    let filter = params.priority_filter.trim().to_lowercase();

    let priority = match filter.as_str() {
        "all" => None,
        other => Some(other.parse::<Priority>()?),
    };

    let active: Vec<_> = desk
        .open_tickets(priority)
        .into_iter()
        .map(ticket_summary)
        .collect();

    Ok(json!({
        "priority_filter": filter,
        "count": active.len(),
        "tickets": active,
    }))
}
