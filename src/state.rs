//! Shared application state for all routes.

use crate::config::UpdateMode;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Constructed once at startup and handed to every handler; there is no global connection.
    pub store: Arc<dyn DocumentStore>,
    pub update_mode: UpdateMode,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, update_mode: UpdateMode) -> Self {
        AppState { store, update_mode }
    }
}
