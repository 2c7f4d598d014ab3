use std::sync::Arc;

use crate::dispatch::Dispatcher;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; turns share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}
