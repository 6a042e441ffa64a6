//! Storefront Outbox — polls unpublished outbox rows and emits them as
//! CloudEvents onto an in-process broadcast channel.
//!
//! Delivery is at-least-once: rows are marked published only after a
//! successful emit, so a crash in between re-emits on the next sweep.
//! Consumers that need exactly-once must deduplicate on their side.

mod event;
mod publisher;

pub use event::CloudEvent;
pub use publisher::{OutboxPublisher, PublisherConfig};
