//! Tool `get_user_profile`: Department, machine, and SLA tier by email.

use serde::Deserialize;
use serde_json::json;

use tooldesk::SupportDesk;

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct ProfileParams {
    email: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "get_user_profile",
        "Retrieve a user's profile by their email address. \
         Returns their name, department, machine type, and SLA tier \
         (standard / high / critical). Use this to determine ticket priority.",
    )
    .param(ParamSpec::required(
        "email",
        ParamType::String,
        "The email address of the user to look up",
    ))
}

pub fn execute(args: &Arguments, desk: &mut SupportDesk) -> ToolOutcome {
    let params: ProfileParams = parse_args(args)?;
    let email = non_blank(&params.email, "email")?;

    let profile = desk.profile(email)?;

    Ok(json!({
        "email": profile.email,
        "name": profile.name,
        "department": profile.department,
        "machine": profile.machine,
        "sla_tier": profile.sla_tier,
    }))
}
