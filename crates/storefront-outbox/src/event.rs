//! CloudEvents v1.0 envelope for outbox payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::models::outbox::OutboxEvent;
use uuid::Uuid;

/// A CloudEvents v1.0 structured event.
///
/// The envelope `id` is freshly generated per emission — with
/// at-least-once delivery the same outbox row may be wrapped more than
/// once, and each emission is a distinct event instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudEvent {
    pub specversion: String,
    pub id: String,
    pub source: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub datacontenttype: String,
    pub time: DateTime<Utc>,
    /// JSON event payload as written by the producing service.
    pub data: serde_json::Value,
}

impl CloudEvent {
    /// Wrap an outbox row in a CloudEvents envelope.
    ///
    /// A payload that is not valid JSON is carried as a JSON string
    /// rather than dropped.
    pub fn from_outbox(source: &str, event: &OutboxEvent) -> Self {
        let data = serde_json::from_str(&event.payload)
            .unwrap_or_else(|_| serde_json::Value::String(event.payload.clone()));

        Self {
            specversion: "1.0".into(),
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            event_type: event.event_type.clone(),
            datacontenttype: "application/json".into(),
            time: Utc::now(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outbox_row(payload: &str) -> OutboxEvent {
        OutboxEvent {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            event_type: "order.created".into(),
            payload: payload.into(),
            published: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn wraps_json_payload() {
        let event = CloudEvent::from_outbox("storefront", &outbox_row(r#"{"orderId":"abc"}"#));
        assert_eq!(event.specversion, "1.0");
        assert_eq!(event.event_type, "order.created");
        assert_eq!(event.data["orderId"], "abc");
    }

    #[test]
    fn non_json_payload_is_carried_as_string() {
        let event = CloudEvent::from_outbox("storefront", &outbox_row("not json"));
        assert_eq!(event.data, serde_json::Value::String("not json".into()));
    }

    #[test]
    fn type_field_serializes_as_type() {
        let event = CloudEvent::from_outbox("storefront", &outbox_row("{}"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "order.created");
        assert_eq!(json["datacontenttype"], "application/json");
    }
}
