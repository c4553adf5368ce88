//! Domain models for the Lina Optic backend.
//!
//! Wire types serialize with camelCase field names, matching what the SPA
//! and dashboard consume.

pub mod admin_user;
pub mod contact;
pub mod order;
pub mod product;

pub use admin_user::{AdminUser, CurrentAdmin};
pub use contact::{ContactInput, ContactMessage};
pub use order::{CreateOrder, CreateOrderItem, NewOrder, NewOrderItem, Order, OrderAddress, OrderItem};
pub use product::{Product, ProductColor, ProductInput};
