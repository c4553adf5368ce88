//! Business-logic services sitting between routes and repositories.

pub mod auth;
pub mod email;

pub use auth::AuthService;
pub use email::EmailService;
