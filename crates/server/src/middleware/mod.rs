//! Request middleware: admin auth, CORS, rate limiting, request IDs.

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod request_id;
