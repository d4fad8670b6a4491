//! Shop store: products, customers, and their orders.

use crate::types::{Customer, DeskError, DeskResult, Order, Product};

/// In-memory shop.
#[derive(Debug, Clone, Default)]
pub struct Shop {
    products: Vec<Product>,
    customers: Vec<Customer>,
    orders: Vec<Order>,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shop with five products, three customers, and five orders.
    pub fn seeded() -> Self {
        let mut shop = Self::new();

        let catalogue = [
            (1, "Wireless Mouse", 29.99, "Ergonomic wireless mouse with USB receiver"),
            (2, "Mechanical Keyboard", 89.99, "Compact mechanical keyboard with RGB backlight"),
            (3, "USB-C Hub", 49.99, "7-in-1 USB-C hub with HDMI and card reader"),
            (4, "Monitor Stand", 39.99, "Adjustable aluminium monitor riser"),
            (5, "Webcam HD", 69.99, "1080p webcam with built-in microphone"),
        ];
        for (id, name, price, description) in catalogue {
            shop.products.push(Product {
                id,
                name: name.to_string(),
                price,
                description: description.to_string(),
            });
        }

        let people = [
            (101, "Alice Johnson", "alice.johnson@example.com"),
            (102, "Bob Smith", "bob.smith@example.com"),
            (103, "Carol White", "carol.white@example.com"),
        ];
        for (id, name, email) in people {
            shop.customers.push(Customer {
                id,
                name: name.to_string(),
                email: email.to_string(),
            });
        }

        shop.orders.extend([
            Order::new(101, "Wireless Mouse x1"),
            Order::new(101, "Mechanical Keyboard x1, USB-C Hub x2"),
            Order::new(102, "Monitor Stand x1"),
            Order::new(102, "Webcam HD x1, Wireless Mouse x1"),
            Order::new(103, "USB-C Hub x1"),
        ]);

        shop
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: i64) -> DeskResult<&Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .ok_or(DeskError::CustomerNotFound(id))
    }

    /// Register a customer. IDs must be unique.
    pub fn add_customer(&mut self, customer: Customer) -> DeskResult<&Customer> {
        if self.customers.iter().any(|c| c.id == customer.id) {
            return Err(DeskError::DuplicateCustomer(customer.id));
        }
        if customer.name.trim().is_empty() {
            return Err(DeskError::InvalidInput("name must not be empty".to_string()));
        }
        if !customer.email.contains('@') {
            return Err(DeskError::InvalidInput(format!(
                "'{}' is not an email address",
                customer.email
            )));
        }

        tracing::debug!("Added customer {} ({})", customer.id, customer.name);
        self.customers.push(customer);
        let index = self.customers.len() - 1;
        Ok(&self.customers[index])
    }

    /// Record an order for an existing customer.
    pub fn place_order(&mut self, customer_id: i64, description: &str) -> DeskResult<&Order> {
        self.customer(customer_id)?;
        self.orders.push(Order::new(customer_id, description));
        let index = self.orders.len() - 1;
        Ok(&self.orders[index])
    }

    /// All orders of a customer, in placement order.
    pub fn orders_for(&self, customer_id: i64) -> DeskResult<Vec<&Order>> {
        self.customer(customer_id)?;
        Ok(self
            .orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_counts() {
        let shop = Shop::seeded();
        assert_eq!(shop.products().len(), 5);
        assert_eq!(shop.customers().len(), 3);
        assert_eq!(shop.orders_for(101).unwrap().len(), 2);
        assert_eq!(shop.orders_for(103).unwrap().len(), 1);
    }

    #[test]
    fn test_orders_for_unknown_customer() {
        let shop = Shop::seeded();
        let err = shop.orders_for(999).unwrap_err();
        assert_eq!(err.to_string(), "No customer found with id: 999");
    }

    #[test]
    fn test_add_customer_then_lookup() {
        let mut shop = Shop::seeded();
        shop.add_customer(Customer {
            id: 104,
            name: "Dan Brown".to_string(),
            email: "dan@example.com".to_string(),
        })
        .unwrap();
        assert_eq!(shop.customer(104).unwrap().name, "Dan Brown");
        assert!(shop.orders_for(104).unwrap().is_empty());
    }

    #[test]
    fn test_add_customer_rejects_duplicate_id() {
        let mut shop = Shop::seeded();
        let err = shop
            .add_customer(Customer {
                id: 101,
                name: "Impostor".to_string(),
                email: "x@example.com".to_string(),
            })
            .unwrap_err();
        assert_eq!(err, DeskError::DuplicateCustomer(101));
        assert_eq!(shop.customers().len(), 3);
    }

    #[test]
    fn test_add_customer_rejects_bad_email() {
        let mut shop = Shop::new();
        let err = shop
            .add_customer(Customer {
                id: 1,
                name: "Eve".to_string(),
                email: "not-an-email".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, DeskError::InvalidInput(_)));
    }

    #[test]
    fn test_place_order() {
        let mut shop = Shop::seeded();
        let order_id = shop.place_order(103, "Webcam HD x2").unwrap().id;
        let orders = shop.orders_for(103).unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[1].id, order_id);
        assert!(shop.place_order(500, "anything").is_err());
    }
}
