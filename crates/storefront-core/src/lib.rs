//! Storefront Core — domain models, repository traits, and validation
//! rules shared across all crates.

pub mod error;
pub mod models;
pub mod repository;
pub mod validation;

pub use error::{StorefrontError, StorefrontResult};
