//! Application state shared across routes

use std::sync::Arc;

use crate::config::Config;
use crate::matchmaking::RelayService;

/// Shared application state. Created once at process start and injected
/// into every handler; the queue and room table live inside the relay
/// service rather than in module-level globals
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub relay: Arc<RelayService>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            relay: Arc::new(RelayService::new()),
        }
    }
}
