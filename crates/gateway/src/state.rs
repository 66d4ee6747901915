//! Application state for dependency injection.

use std::sync::Arc;

use common::RequestContext;
use user_service_lib::endpoint::Endpoints;
use user_service_lib::infra::Database;

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Arc<Endpoints>,
    pub db: Database,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(endpoints: Endpoints, db: Database, config: GatewayConfig) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            db,
            config,
        }
    }

    /// Fresh operation context carrying the configured request deadline
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.config.request_timeout())
    }
}
