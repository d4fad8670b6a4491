//! Tool `place_order`: Record a new order for an existing customer.

use serde::Deserialize;

use tooldesk::Shop;

use crate::types::ToolOutcome;

use super::descriptor::{non_blank, parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};
use super::summaries::order_summary;

#[derive(Debug, Deserialize)]
struct OrderParams {
    customer_id: i64,
    items: String,
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new("place_order", "Place an order on behalf of a customer")
        .param(ParamSpec::required(
            "customer_id",
            ParamType::Integer,
            "The ID of the ordering customer",
        ))
        .param(ParamSpec::required(
            "items",
            ParamType::String,
            "What was ordered, e.g. 'USB-C Hub x2'",
        ))
}

pub fn execute(args: &Arguments, shop: &mut Shop) -> ToolOutcome {
    let params: OrderParams = parse_args(args)?;
    let items = non_blank(&params.items, "items")?;

    let order = shop.place_order(params.customer_id, items)?;
    tracing::info!("Order {} placed for customer {}", order.id, order.customer_id);
    Ok(order_summary(order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: serde_json::Value) -> Arguments {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_order_is_recorded() {
        let mut shop = Shop::seeded();
        let out = execute(
            &args(json!({"customer_id": 103, "items": " Webcam HD x2 "})),
            &mut shop,
        )
        .unwrap();
        assert_eq!(out["customer_id"], 103);
        assert_eq!(out["description"], "Webcam HD x2");

        let orders = shop.orders_for(103).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(out["id"], orders[1].id.to_string());
    }

    #[test]
    fn test_unknown_customer_and_blank_items() {
        let mut shop = Shop::seeded();
        let err = execute(&args(json!({"customer_id": 999, "items": "x"})), &mut shop)
            .unwrap_err();
        assert_eq!(err.to_string(), "No customer found with id: 999");

        let err = execute(&args(json!({"customer_id": 101, "items": "  "})), &mut shop)
            .unwrap_err();
        assert_eq!(err.to_string(), "items is required");
        assert_eq!(shop.orders_for(101).unwrap().len(), 2);
    }
}
