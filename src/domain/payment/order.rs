//! Order and cart snapshots owned by the order subsystem.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::OrderId;

/// Order as seen by the payment integration. Read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,

    /// Order total in major currency units.
    pub amount: Decimal,

    /// ISO 4217 currency code, already resolved by the caller.
    pub currency: String,

    /// Buyer display name.
    pub name: String,

    /// Buyer email.
    pub email: String,

    #[serde(default)]
    pub fields: OrderFields,
}

/// Optional buyer details collected at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFields {
    pub country: Option<String>,
    pub lang: Option<String>,
    pub address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
}

impl OrderFields {
    pub fn country(&self) -> Option<&str> {
        filled(&self.country)
    }

    pub fn lang(&self) -> Option<&str> {
        filled(&self.lang)
    }

    pub fn address(&self) -> Option<&str> {
        filled(&self.address)
    }

    pub fn zip(&self) -> Option<&str> {
        filled(&self.zip)
    }

    pub fn city(&self) -> Option<&str> {
        filled(&self.city)
    }

    pub fn phone(&self) -> Option<&str> {
        filled(&self.phone)
    }
}

fn filled(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Cart line snapshot from the cart collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,

    /// Unit price in major currency units.
    pub unit_price: Decimal,

    pub quantity: Decimal,
}

impl CartItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal, quantity: Decimal) -> Self {
        Self {
            name: name.into(),
            unit_price,
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_missing() {
        let fields = OrderFields {
            country: Some(String::new()),
            city: Some("Kraków".to_string()),
            ..Default::default()
        };

        assert_eq!(fields.country(), None);
        assert_eq!(fields.lang(), None);
        assert_eq!(fields.city(), Some("Kraków"));
    }

    #[test]
    fn order_deserializes_without_fields() {
        let order: Order = serde_json::from_str(
            r#"{"id":1,"amount":"10.50","currency":"PLN","name":"Jan","email":"jan@example.com"}"#,
        )
        .unwrap();

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.fields, OrderFields::default());
    }
}
