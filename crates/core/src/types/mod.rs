//! Core types for Lina Optic.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod localized;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use localized::LocalizedText;
pub use status::*;
