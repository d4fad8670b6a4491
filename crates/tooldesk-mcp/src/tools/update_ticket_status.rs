//! Tool `update_ticket_status`: Move a ticket through open → in_progress → resolved.

use serde::Deserialize;
use serde_json::json;

use tooldesk::{SupportDesk, TicketStatus};

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct UpdateParams {
    ticket_id: String,
    status: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "update_ticket_status",
        "Update the status of an existing support ticket. \
         Valid transitions: open → in_progress → resolved. \
         Returns the updated ticket details. \
         Use this when a user says their issue is fixed or when escalating.",
    )
    .param(ParamSpec::required(
        "ticket_id",
        ParamType::String,
        "The ticket ID to update (e.g. T-AA1B2C)",
    ))
    .param(
        ParamSpec::required("status", ParamType::String, "The new status for the ticket")
            .with_choices(&TicketStatus::ALL),
    )
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: UpdateParams = parse_args(args)?;
    let ticket_id = non_blank(&params.ticket_id, "ticket_id")?;
    let status: TicketStatus = non_blank(&params.status, "status")?.parse()?;

    let change = desk.update_status(ticket_id, status)?;

    Ok(json!({
        "id": change.ticket.id,
        "title": change.ticket.title,
        "old_status": change.old_status,
        "new_status": change.ticket.status,
        "priority": change.ticket.priority,
        "user_email": change.ticket.user_email,
    }))
}
