//! SurrealDB implementation of [`OutboxRepository`].
//!
//! The poller reads across tenants, so `list_unpublished` is the one
//! read path in this crate without a tenant filter. Rows are returned
//! oldest first to keep publish order close to creation order.

use chrono::{DateTime, Utc};
use storefront_core::error::StorefrontResult;
use storefront_core::models::outbox::{CreateOutboxEvent, OutboxEvent};
use storefront_core::repository::OutboxRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OutboxRow {
    tenant_id: String,
    event_type: String,
    payload: String,
    published: bool,
    created_at: DateTime<Utc>,
}

impl OutboxRow {
    fn into_event(self, id: Uuid) -> Result<OutboxEvent, DbError> {
        let tenant_id = Uuid::parse_str(&self.tenant_id)
            .map_err(|e| DbError::Decode(format!("invalid tenant UUID: {e}")))?;
        Ok(OutboxEvent {
            id,
            tenant_id,
            event_type: self.event_type,
            payload: self.payload,
            published: self.published,
            created_at: self.created_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OutboxRowWithId {
    record_id: String,
    tenant_id: String,
    event_type: String,
    payload: String,
    published: bool,
    created_at: DateTime<Utc>,
}

impl OutboxRowWithId {
    fn try_into_event(self) -> Result<OutboxEvent, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        OutboxRow {
            tenant_id: self.tenant_id,
            event_type: self.event_type,
            payload: self.payload,
            published: self.published,
            created_at: self.created_at,
        }
        .into_event(id)
    }
}

/// SurrealDB implementation of the Outbox repository.
#[derive(Clone)]
pub struct SurrealOutboxRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOutboxRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OutboxRepository for SurrealOutboxRepository<C> {
    async fn append(&self, input: CreateOutboxEvent) -> StorefrontResult<OutboxEvent> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('outbox_event', $id) SET \
                 tenant_id = $tenant_id, \
                 event_type = $event_type, \
                 payload = $payload, \
                 published = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("event_type", input.event_type))
            .bind(("payload", input.payload))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Decode(e.to_string()))?;

        let rows: Vec<OutboxRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "outbox_event".into(),
            id: id_str,
        })?;

        Ok(row.into_event(id)?)
    }

    async fn list_unpublished(&self, limit: u64) -> StorefrontResult<Vec<OutboxEvent>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM outbox_event \
                 WHERE published = false \
                 ORDER BY created_at ASC \
                 LIMIT $limit",
            )
            .bind(("limit", limit))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OutboxRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_event())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }

    async fn mark_published(&self, id: Uuid) -> StorefrontResult<()> {
        self.db
            .query(
                "UPDATE type::record('outbox_event', $id) SET \
                 published = true",
            )
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Decode(e.to_string()))?;

        Ok(())
    }
}
