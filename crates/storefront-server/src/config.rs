//! Server configuration, loaded from `STOREFRONT_*` environment
//! variables with sensible local-development defaults.

use std::time::Duration;

use storefront_db::DbConfig;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (e.g. `0.0.0.0:8080`).
    pub http_addr: String,
    /// Deployment context path stripped before exclusion matching.
    pub context_path: String,
    /// Extra tenant-guard exclusion patterns (comma-separated in the
    /// environment).
    pub extra_excluded_paths: Vec<String>,
    /// Optional server-side pepper for customer password hashing.
    pub pepper: Option<String>,
    /// Outbox sweep interval.
    pub outbox_interval: Duration,
    pub db: DbConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: "0.0.0.0:8080".into(),
            context_path: String::new(),
            extra_excluded_paths: Vec::new(),
            pepper: None,
            outbox_interval: Duration::from_secs(10),
            db: DbConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("STOREFRONT_HTTP_ADDR") {
            config.http_addr = addr;
        }
        if let Ok(context_path) = std::env::var("STOREFRONT_CONTEXT_PATH") {
            config.context_path = context_path;
        }
        if let Ok(paths) = std::env::var("STOREFRONT_EXCLUDED_PATHS") {
            config.extra_excluded_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Ok(pepper) = std::env::var("STOREFRONT_PEPPER") {
            if !pepper.is_empty() {
                config.pepper = Some(pepper);
            }
        }
        if let Ok(secs) = std::env::var("STOREFRONT_OUTBOX_INTERVAL_SECS") {
            if let Ok(secs) = secs.parse::<u64>() {
                config.outbox_interval = Duration::from_secs(secs.max(1));
            }
        }

        if let Ok(url) = std::env::var("STOREFRONT_DB_URL") {
            config.db.url = url;
        }
        if let Ok(ns) = std::env::var("STOREFRONT_DB_NAMESPACE") {
            config.db.namespace = ns;
        }
        if let Ok(db) = std::env::var("STOREFRONT_DB_NAME") {
            config.db.database = db;
        }
        if let Ok(user) = std::env::var("STOREFRONT_DB_USER") {
            config.db.username = user;
        }
        if let Ok(pass) = std::env::var("STOREFRONT_DB_PASSWORD") {
            config.db.password = pass;
        }

        config
    }
}
