use std::sync::Arc;

use crate::config::Config;
use crate::store::{DocumentStore, SaveGuard};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable document store. Default: PgDocumentStore. Swap via STORE_BACKEND.
    pub store: Arc<dyn DocumentStore>,
    pub save_guard: SaveGuard,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: Config) -> Self {
        Self {
            store,
            save_guard: SaveGuard::default(),
            config,
        }
    }
}
