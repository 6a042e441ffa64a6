//! Shared application state: one instance of each domain service,
//! wired over SurrealDB repositories.

use std::sync::Arc;

use storefront_db::repository::{
    SurrealBrandRepository, SurrealCartRepository, SurrealCategoryRepository,
    SurrealCustomerRepository, SurrealOrderRepository, SurrealOutboxRepository,
    SurrealProductRepository, SurrealStockRepository,
};
use storefront_domain::{
    CartService, CatalogService, CustomerService, OrderService, ShowcaseService, StockService,
};
use surrealdb::{Connection, Surreal};

/// Generic over the SurrealDB engine so the same router serves the
/// remote client in production and the in-memory engine in tests.
pub struct AppState<C: Connection> {
    pub catalog: Arc<
        CatalogService<
            SurrealBrandRepository<C>,
            SurrealCategoryRepository<C>,
            SurrealProductRepository<C>,
        >,
    >,
    pub showcase: Arc<ShowcaseService<SurrealProductRepository<C>>>,
    pub carts: Arc<CartService<SurrealCartRepository<C>>>,
    pub orders: Arc<
        OrderService<
            SurrealOrderRepository<C>,
            SurrealCartRepository<C>,
            SurrealOutboxRepository<C>,
        >,
    >,
    pub customers: Arc<CustomerService<SurrealCustomerRepository<C>>>,
    pub stock: Arc<StockService<SurrealStockRepository<C>>>,
}

impl<C: Connection> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: self.catalog.clone(),
            showcase: self.showcase.clone(),
            carts: self.carts.clone(),
            orders: self.orders.clone(),
            customers: self.customers.clone(),
            stock: self.stock.clone(),
        }
    }
}

impl<C: Connection> AppState<C> {
    /// Build the full service graph on top of one database handle.
    ///
    /// `pepper` is the optional server-side secret mixed into customer
    /// password hashes.
    pub fn new(db: Surreal<C>, pepper: Option<String>) -> Self {
        let customer_repo = match pepper {
            Some(pepper) => SurrealCustomerRepository::with_pepper(db.clone(), pepper),
            None => SurrealCustomerRepository::new(db.clone()),
        };

        Self {
            catalog: Arc::new(CatalogService::new(
                SurrealBrandRepository::new(db.clone()),
                SurrealCategoryRepository::new(db.clone()),
                SurrealProductRepository::new(db.clone()),
            )),
            showcase: Arc::new(ShowcaseService::new(SurrealProductRepository::new(
                db.clone(),
            ))),
            carts: Arc::new(CartService::new(SurrealCartRepository::new(db.clone()))),
            orders: Arc::new(OrderService::new(
                SurrealOrderRepository::new(db.clone()),
                SurrealCartRepository::new(db.clone()),
                SurrealOutboxRepository::new(db.clone()),
            )),
            customers: Arc::new(CustomerService::new(customer_repo)),
            stock: Arc::new(StockService::new(SurrealStockRepository::new(db))),
        }
    }
}
