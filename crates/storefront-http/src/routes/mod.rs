//! Route handlers, one module per resource.

pub mod brands;
pub mod carts;
pub mod categories;
pub mod customers;
pub mod docs;
pub mod orders;
pub mod products;
pub mod showcase;
pub mod stock;
