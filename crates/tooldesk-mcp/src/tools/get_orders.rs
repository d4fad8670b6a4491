//! Tool `get_orders`: Every order of one customer.

use serde::Deserialize;
use serde_json::json;

use tooldesk::Shop;

use crate::types::ToolOutcome;

use super::descriptor::{parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};
use super::summaries::order_summary;

#[derive(Debug, Deserialize)]
struct OrdersParams {
    customer_id: i64,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "get_orders",
        "Retrieve all orders for a specific customer by their customer ID",
    )
    .param(ParamSpec::required(
        "customer_id",
        ParamType::Integer,
        "The ID of the customer whose orders to retrieve",
    ))
}

pub fn execute(args: &Arguments, shop: &mut Shop) -> ToolOutcome {
    let params: OrdersParams = parse_args(args)?;
    let orders: Vec<_> = shop
        .orders_for(params.customer_id)?
        .into_iter()
        .map(order_summary)
        .collect();

    Ok(json!({
        "customer_id": params.customer_id,
        "order_count": orders.len(),
        "orders": orders,
    }))
}
