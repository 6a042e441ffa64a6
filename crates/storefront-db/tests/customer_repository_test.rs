//! Integration tests for the Customer repository using in-memory
//! SurrealDB.

use storefront_core::models::customer::{CreateCustomer, CustomerStatus, UpdateCustomer};
use storefront_core::repository::{CustomerRepository, Pagination};
use storefront_db::repository::SurrealCustomerRepository;
use storefront_db::verify_password;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> (Surreal<surrealdb::engine::local::Db>, Uuid) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    (db, Uuid::new_v4())
}

#[tokio::test]
async fn create_and_get_customer() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealCustomerRepository::new(db);

    let customer = repo
        .create(CreateCustomer {
            tenant_id,
            name: "Alice".into(),
            email: "alice@example.com".into(),
            password: "SuperSecret123!".into(),
        })
        .await
        .unwrap();

    assert_eq!(customer.tenant_id, tenant_id);
    assert_eq!(customer.status, CustomerStatus::Active);

    // Password should be hashed, not stored in plaintext.
    assert_ne!(customer.password_hash, "SuperSecret123!");
    assert!(customer.password_hash.starts_with("$argon2id$"));

    let fetched = repo.get_by_id(tenant_id, customer.id).await.unwrap();
    assert_eq!(fetched.email, "alice@example.com");

    let by_email = repo
        .get_by_email(tenant_id, "alice@example.com")
        .await
        .unwrap();
    assert_eq!(by_email.id, customer.id);

    assert!(repo.email_exists(tenant_id, "alice@example.com").await.unwrap());
    assert!(!repo.email_exists(tenant_id, "bob@example.com").await.unwrap());
}

#[tokio::test]
async fn password_verification() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealCustomerRepository::new(db);

    let customer = repo
        .create(CreateCustomer {
            tenant_id,
            name: "Bob".into(),
            email: "bob@example.com".into(),
            password: "MyPassword42!".into(),
        })
        .await
        .unwrap();

    assert!(verify_password("MyPassword42!", &customer.password_hash, None).unwrap());
    assert!(!verify_password("WrongPassword", &customer.password_hash, None).unwrap());
}

#[tokio::test]
async fn password_with_pepper() {
    let (db, tenant_id) = setup().await;
    let pepper = "server-secret-pepper".to_string();
    let repo = SurrealCustomerRepository::with_pepper(db, pepper.clone());

    let customer = repo
        .create(CreateCustomer {
            tenant_id,
            name: "Carol".into(),
            email: "carol@example.com".into(),
            password: "PepperedPass!".into(),
        })
        .await
        .unwrap();

    assert!(verify_password("PepperedPass!", &customer.password_hash, Some(&pepper)).unwrap());
    // Without the pepper the hash must not verify.
    assert!(!verify_password("PepperedPass!", &customer.password_hash, None).unwrap());
}

#[tokio::test]
async fn update_and_soft_delete() {
    let (db, tenant_id) = setup().await;
    let repo = SurrealCustomerRepository::new(db);

    let customer = repo
        .create(CreateCustomer {
            tenant_id,
            name: "Dave".into(),
            email: "dave@example.com".into(),
            password: "Password123!".into(),
        })
        .await
        .unwrap();

    let updated = repo
        .update(
            tenant_id,
            customer.id,
            UpdateCustomer {
                name: Some("David".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "David");

    // Delete is a soft-delete: the row stays, status flips.
    repo.delete(tenant_id, customer.id).await.unwrap();
    let after = repo.get_by_id(tenant_id, customer.id).await.unwrap();
    assert_eq!(after.status, CustomerStatus::Inactive);

    let page = repo.list(tenant_id, Pagination::default()).await.unwrap();
    assert_eq!(page.total, 1);
}
