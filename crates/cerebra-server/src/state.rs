use std::sync::Arc;
use std::time::Duration;

use tera::Tera;

use cerebra_export::styles::DocumentStyles;

use crate::config::ServerConfig;
use crate::page;
use crate::sessions::SessionStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub templates: Arc<Tera>,
    pub styles: Arc<DocumentStyles>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, tera::Error> {
        Ok(Self {
            sessions: SessionStore::new(
                Duration::from_secs(config.session_ttl_secs),
                config.secure_cookies,
            ),
            templates: Arc::new(page::templates()?),
            styles: Arc::new(DocumentStyles::default()),
            max_upload_bytes: config.max_upload_bytes,
        })
    }
}
