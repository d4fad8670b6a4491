//! Tool `create_ticket`: File a new support ticket.

use serde::Deserialize;

use tooldesk::{NewTicket, Priority, SupportDesk};

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};
use super::summaries::ticket_summary;

#[derive(Debug, Deserialize)]
struct CreateParams {
    title: String,
    description: String,
    user_email: String,
    priority: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "create_ticket",
        "Create a new IT support ticket. Only call this after search_tickets confirms \
         no duplicate exists and after get_user_profile confirms the correct priority. \
         Returns the new ticket ID, priority, status, and creation timestamp.",
    )
    .param(ParamSpec::required(
        "title",
        ParamType::String,
        "Short title summarising the issue (max ~80 chars)",
    ))
    .param(ParamSpec::required(
        "description",
        ParamType::String,
        "Full description of the problem with all relevant details",
    ))
    .param(ParamSpec::required(
        "user_email",
        ParamType::String,
        "Email address of the user reporting the issue",
    ))
    .param(
        ParamSpec::required(
            "priority",
            ParamType::String,
            "Ticket priority based on user SLA: critical/high SLA → high, standard SLA → medium or low",
        )
        .with_choices(&Priority::ALL),
    )
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: CreateParams = parse_args(args)?;
    let priority: Priority = params.priority.parse()?;

    let ticket = desk.create_ticket(NewTicket {
        title: non_blank(&params.title, "title")?.to_string(),
        description: params.description.trim().to_string(),
        user_email: non_blank(&params.user_email, "user_email")?.to_string(),
        priority,
    })?;

    tracing::info!("Created ticket {} for {}", ticket.id, ticket.user_email);
    Ok(ticket_summary(ticket))
}
