//! JSON views of store records shared by several tools.

use serde_json::{json, Value};

use tooldesk::{Order, Ticket};

/// Ticket fields an agent needs to triage, without description or comments.
pub fn ticket_summary(ticket: &Ticket) -> Value {
    json!({
        "id": ticket.id,
        "title": ticket.title,
        "priority": ticket.priority,
        "status": ticket.status,
        "user_email": ticket.user_email,
        "created_at": ticket.created_at,
    })
}

pub fn order_summary(order: &Order) -> Value {
    json!({
        "id": order.id.to_string(),
        "customer_id": order.customer_id,
        "description": order.description,
    })
}
