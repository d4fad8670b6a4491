//! Tool `echo`: Return the message unchanged.

use serde::Deserialize;
use serde_json::Value;

use crate::types::ToolOutcome;

use super::descriptor::{parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct EchoParams {
    message: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new("echo", "Echo the given message back").param(ParamSpec::required(
        "message",
        ParamType::String,
        "Text to send back",
    ))
}

pub fn execute(args: &Arguments, _store: &mut ()) -> ToolOutcome {
    let params: EchoParams = parse_args(args)?;
    Ok(Value::String(params.message))
}
