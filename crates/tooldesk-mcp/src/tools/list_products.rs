//! Tool `list_products`: The shop catalogue.

use serde_json::json;

use tooldesk::Shop;

use crate::types::ToolOutcome;

use super::descriptor::{Arguments, ToolDescriptor};

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "list_products",
        "List every product in the shop catalogue with its ID, name, price, and description",
    )
}

pub fn execute(_args: &Arguments, shop: &mut Shop) -> ToolOutcome {
    Ok(json!({
        "product_count": shop.products().len(),
        "products": shop.products(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_seeded_catalogue() {
        let mut shop = Shop::seeded();
        let out = execute(&Arguments::new(), &mut shop).unwrap();
        assert_eq!(out["product_count"], 5);
        assert_eq!(out["products"][0]["name"], "Wireless Mouse");
        assert_eq!(out["products"][0]["price"], 29.99);
    }
}
