//! Storefront Server — application entry point.

mod config;

use std::sync::Arc;

use storefront_db::DbManager;
use storefront_db::repository::SurrealOutboxRepository;
use storefront_http::{AppState, TenantGuardConfig};
use storefront_outbox::{OutboxPublisher, PublisherConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("storefront=info".parse().unwrap()),
        )
        .json()
        .init();

    let config = ServerConfig::from_env();
    info!(addr = %config.http_addr, "Starting storefront server...");

    let db = match DbManager::connect(&config.db).await {
        Ok(db) => db,
        Err(e) => {
            error!(error = %e, "Failed to connect to the database");
            std::process::exit(1);
        }
    };

    if let Err(e) = storefront_db::run_migrations(db.client()).await {
        error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    // Outbox publisher: periodic sweep over unpublished rows. Events
    // land on an in-process channel; a broker bridge subscribes here
    // when one is deployed. Until then the subscriber below keeps the
    // channel drained and the deliveries visible in the logs.
    let publisher = Arc::new(OutboxPublisher::new(
        SurrealOutboxRepository::new(db.client().clone()),
        PublisherConfig {
            interval: config.outbox_interval,
            ..Default::default()
        },
    ));
    let mut events = publisher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(
                event_id = %event.id,
                event_type = %event.event_type,
                "Outbox event published"
            );
        }
    });
    let publisher_handle = publisher.clone().start();

    let mut guard = TenantGuardConfig::default().with_context_path(config.context_path.clone());
    for pattern in &config.extra_excluded_paths {
        guard = guard.exclude(pattern.clone());
    }

    let state = AppState::new(db.client().clone(), config.pepper.clone());
    let app = storefront_http::api_router(state, guard);

    let listener = match tokio::net::TcpListener::bind(&config.http_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.http_addr, error = %e, "Failed to bind listener");
            std::process::exit(1);
        }
    };

    info!(addr = %config.http_addr, "Storefront server listening");

    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received shutdown signal, stopping server...");
        })
        .await;

    // Stop the outbox sweep after the server drains.
    publisher.shutdown();
    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), publisher_handle).await;

    if let Err(e) = result {
        error!(error = %e, "Server error");
        std::process::exit(1);
    }

    info!("Storefront server stopped.");
}
