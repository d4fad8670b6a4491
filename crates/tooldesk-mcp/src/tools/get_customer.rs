//! Tool `get_customer`: Customer details by ID.

use serde::Deserialize;
use serde_json::json;

use tooldesk::Shop;

use crate::types::ToolOutcome;

use super::descriptor::{parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct CustomerParams {
    customer_id: i64,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "get_customer",
        "Retrieve a customer's details by their customer ID",
    )
    .param(ParamSpec::required(
        "customer_id",
        ParamType::Integer,
        "The ID of the customer to retrieve",
    ))
}

pub fn execute(args: &Arguments, shop: &mut Shop) -> ToolOutcome {
    let params: CustomerParams = parse_args(args)?;
    let customer = shop.customer(params.customer_id)?;

    Ok(json!({
        "id": customer.id,
        "name": customer.name,
        "email": customer.email,
    }))
}
