//! Domain models for the storefront platform.
//!
//! Every persisted aggregate is owned by exactly one tenant and carries
//! a non-nullable `tenant_id`. Repositories filter on it for every read,
//! update, and delete.

pub mod brand;
pub mod cart;
pub mod category;
pub mod customer;
pub mod order;
pub mod outbox;
pub mod product;
pub mod stock;
