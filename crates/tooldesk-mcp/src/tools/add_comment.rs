//! Tool `add_comment`: Append a timestamped note to a ticket.

use serde::Deserialize;
use serde_json::json;

use tooldesk::SupportDesk;

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct CommentParams {
    ticket_id: String,
    comment: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "add_comment",
        "Add a timestamped comment to an existing support ticket. \
         Use this to record investigation notes, workarounds, or status updates \
         on behalf of the support agent.",
    )
    .param(ParamSpec::required(
        "ticket_id",
        ParamType::String,
        "The ticket ID to comment on (e.g. T-AA1B2C)",
    ))
    .param(ParamSpec::required(
        "comment",
        ParamType::String,
        "The comment text to append to the ticket",
    ))
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: CommentParams = parse_args(args)?;
    let ticket_id = non_blank(&params.ticket_id, "ticket_id")?;
    let text = non_blank(&params.comment, "comment")?;

    let (ticket, comment) = desk.add_comment(ticket_id, text)?;

    Ok(json!({
        "id": ticket.id,
        "title": ticket.title,
        "comment_added": comment.text,
        "timestamp": comment.timestamp,
        "total_comments": ticket.comments.len(),
    }))
}
