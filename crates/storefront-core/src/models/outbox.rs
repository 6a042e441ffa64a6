//! Outbox event domain model.
//!
//! An outbox row is written alongside the business change it describes
//! and published asynchronously by the outbox poller — at-least-once,
//! no consumer-side deduplication.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    /// The tenant whose change produced this event.
    pub tenant_id: Uuid,
    /// Event type, e.g. `order.created`.
    pub event_type: String,
    /// JSON-encoded event payload.
    pub payload: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to append a new outbox event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOutboxEvent {
    pub tenant_id: Uuid,
    pub event_type: String,
    pub payload: String,
}
