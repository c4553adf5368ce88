//! Order models.
//!
//! An order is a flat customer record plus line items. Items keep a
//! reference to the product they were created from; deleting a product
//! later leaves the reference empty rather than deleting history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lina_optic_core::{Email, OrderId, OrderItemId, OrderStatus, ProductId};

/// Shipping address captured at checkout. All fields optional; the shop
/// also takes phone orders where only the city is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
}

/// A stored order line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    /// Product the item was created from; `None` once the product is deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    /// Display name of the chosen color, if the product had variants.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
    pub quantity: i32,
    /// Selling price at order time.
    pub unit_price: Decimal,
}

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<OrderAddress>,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of an incoming order request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub color_name: Option<String>,
    pub quantity: i32,
}

/// Payload for creating an order.
///
/// Prices are looked up server-side; the client only says what and how many.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: Option<OrderAddress>,
    pub items: Vec<CreateOrderItem>,
}

impl CreateOrder {
    /// Validate the parts that don't need a database lookup.
    ///
    /// # Errors
    ///
    /// Returns a human-readable message describing the first failed check.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_owned());
        }
        if self.phone.trim().is_empty() {
            return Err("phone must not be empty".to_owned());
        }
        if self.items.is_empty() {
            return Err("order must contain at least one item".to_owned());
        }
        for item in &self.items {
            if item.quantity < 1 {
                return Err("item quantity must be at least 1".to_owned());
            }
        }
        Ok(())
    }
}

/// A priced order ready for insertion, produced from a [`CreateOrder`]
/// after product lookup.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: Option<OrderAddress>,
    pub items: Vec<NewOrderItem>,
}

/// A priced line item ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub color_name: Option<String>,
    pub quantity: i32,
    pub unit_price: Decimal,
}

impl NewOrder {
    /// Order total: sum of quantity times unit price over all items.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| Decimal::from(item.quantity) * item.unit_price)
            .sum()
    }
}
