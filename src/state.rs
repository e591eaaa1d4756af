use std::sync::Arc;

use crate::database::EntityStore;
use crate::realtime::Broadcaster;

/// Shared application context, constructed once at startup and cloned into
/// every handler. Holds the store and broadcaster behind their boundary
/// traits so tests can substitute in-process fakes.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(store: Arc<dyn EntityStore>, broadcaster: Broadcaster) -> Self {
        Self { store, broadcaster }
    }
}
