//! Tool `search_tickets`: Keyword search over every ticket.

use serde::Deserialize;
use serde_json::json;

use tooldesk::SupportDesk;

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};
use super::summaries::ticket_summary;

#[derive(Debug, Deserialize)]
struct SearchParams {
    keyword: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "search_tickets",
        "Search support tickets by keyword. Scans both title and description. \
         Returns matching tickets with their ID, title, priority, status, and owner email. \
         Always call this first to check for duplicates before creating a new ticket.",
    )
    .param(ParamSpec::required(
        "keyword",
        ParamType::String,
        "Word or phrase to search for in ticket titles and descriptions",
    ))
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: SearchParams = parse_args(args)?;
    let keyword = non_blank(&params.keyword, "keyword")?.to_lowercase();

    let matches: Vec<_> = desk.search(&keyword).into_iter().map(ticket_summary).collect();

    Ok(json!({
        "keyword": keyword,
        "match_count": matches.len(),
        "tickets": matches,
    }))
}
