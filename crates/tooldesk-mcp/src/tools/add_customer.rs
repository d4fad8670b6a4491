//! Tool `add_customer`: Register a new shop customer.

use serde::Deserialize;

use tooldesk::{Customer, Shop};

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct AddParams {
    id: i64,
    name: String,
    email: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new("add_customer", "Add a new customer")
        .param(ParamSpec::required("id", ParamType::Integer, "Customer ID"))
        .param(ParamSpec::required("name", ParamType::String, "Customer name"))
        .param(ParamSpec::required("email", ParamType::String, "Customer email"))
}

pub fn execute(args: &Arguments, shop: &mut Shop) -> ToolOutcome {
    let params: AddParams = parse_args(args)?;

    let customer = shop.add_customer(Customer {
        id: params.id,
        name: non_blank(&params.name, "name")?.to_string(),
        email: non_blank(&params.email, "email")?.to_string(),
    })?;

    tracing::info!("Customer {} added", customer.id);
    Ok(format!("Customer {} added successfully", customer.name).into())
}
