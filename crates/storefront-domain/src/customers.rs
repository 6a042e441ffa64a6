//! Customer service — registration and account management.

use storefront_core::error::{StorefrontError, StorefrontResult};
use storefront_core::models::customer::{CreateCustomer, Customer, UpdateCustomer};
use storefront_core::repository::{CustomerRepository, PaginatedResult, Pagination};
use storefront_core::validation;
use tracing::info;
use uuid::Uuid;

/// Customer service.
pub struct CustomerService<R: CustomerRepository> {
    customer_repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(customer_repo: R) -> Self {
        Self { customer_repo }
    }

    /// Register a new customer. The raw password is hashed by the
    /// repository before storage.
    pub async fn create_customer(&self, input: CreateCustomer) -> StorefrontResult<Customer> {
        validation::validate_customer_name(&input.name)?;
        validation::validate_customer_email(&input.email)?;

        if self
            .customer_repo
            .email_exists(input.tenant_id, &input.email)
            .await?
        {
            return Err(StorefrontError::validation(format!(
                "Email is already registered: {}",
                input.email
            )));
        }

        let customer = self.customer_repo.create(input).await?;
        info!(
            tenant_id = %customer.tenant_id,
            customer_id = %customer.id,
            "Customer registered"
        );
        Ok(customer)
    }

    pub async fn get_customer(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<Customer> {
        self.customer_repo.get_by_id(tenant_id, id).await
    }

    pub async fn list_customers(
        &self,
        tenant_id: Uuid,
        pagination: Pagination,
    ) -> StorefrontResult<PaginatedResult<Customer>> {
        self.customer_repo.list(tenant_id, pagination).await
    }

    pub async fn update_customer(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        input: UpdateCustomer,
    ) -> StorefrontResult<Customer> {
        if let Some(ref name) = input.name {
            validation::validate_customer_name(name)?;
        }
        if let Some(ref email) = input.email {
            validation::validate_customer_email(email)?;

            let current = self.customer_repo.get_by_id(tenant_id, id).await?;
            if current.email != *email
                && self.customer_repo.email_exists(tenant_id, email).await?
            {
                return Err(StorefrontError::validation(format!(
                    "Email is already registered: {email}"
                )));
            }
        }
        self.customer_repo.update(tenant_id, id, input).await
    }

    /// Soft-delete: the customer row stays, its status flips to
    /// Inactive.
    pub async fn deactivate_customer(&self, tenant_id: Uuid, id: Uuid) -> StorefrontResult<()> {
        self.customer_repo.get_by_id(tenant_id, id).await?;
        self.customer_repo.delete(tenant_id, id).await?;
        info!(tenant_id = %tenant_id, customer_id = %id, "Customer deactivated");
        Ok(())
    }
}
