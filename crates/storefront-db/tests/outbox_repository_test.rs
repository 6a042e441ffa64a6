//! Integration tests for the Outbox repository using in-memory
//! SurrealDB.

use storefront_core::models::outbox::CreateOutboxEvent;
use storefront_core::repository::OutboxRepository;
use storefront_db::repository::SurrealOutboxRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    storefront_db::run_migrations(&db).await.unwrap();
    db
}

#[tokio::test]
async fn append_and_poll_unpublished() {
    let db = setup().await;
    let repo = SurrealOutboxRepository::new(db);
    let tenant_id = Uuid::new_v4();

    let event = repo
        .append(CreateOutboxEvent {
            tenant_id,
            event_type: "order.created".into(),
            payload: r#"{"orderId":"abc"}"#.into(),
        })
        .await
        .unwrap();
    assert!(!event.published);
    assert_eq!(event.event_type, "order.created");

    let pending = repo.list_unpublished(100).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, event.id);

    repo.mark_published(event.id).await.unwrap();
    assert!(repo.list_unpublished(100).await.unwrap().is_empty());
}

#[tokio::test]
async fn poll_respects_limit_and_skips_published() {
    let db = setup().await;
    let repo = SurrealOutboxRepository::new(db);
    let tenant_id = Uuid::new_v4();

    let mut ids = Vec::new();
    for i in 0..5 {
        let event = repo
            .append(CreateOutboxEvent {
                tenant_id,
                event_type: "order.created".into(),
                payload: format!(r#"{{"n":{i}}}"#),
            })
            .await
            .unwrap();
        ids.push(event.id);
    }

    let limited = repo.list_unpublished(2).await.unwrap();
    assert_eq!(limited.len(), 2);

    repo.mark_published(ids[0]).await.unwrap();
    repo.mark_published(ids[1]).await.unwrap();

    let remaining = repo.list_unpublished(100).await.unwrap();
    assert_eq!(remaining.len(), 3);
    assert!(remaining.iter().all(|e| !e.published));
}

#[tokio::test]
async fn poller_reads_across_tenants() {
    let db = setup().await;
    let repo = SurrealOutboxRepository::new(db);

    for _ in 0..2 {
        repo.append(CreateOutboxEvent {
            tenant_id: Uuid::new_v4(),
            event_type: "order.finalized".into(),
            payload: "{}".into(),
        })
        .await
        .unwrap();
    }

    // Two different tenants, one sweep.
    let pending = repo.list_unpublished(100).await.unwrap();
    assert_eq!(pending.len(), 2);
}
