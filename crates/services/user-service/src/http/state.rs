//! Application state for dependency injection.

use std::sync::Arc;

use crate::http::handlers::HealthProbe;
use crate::http::middleware::TokenVerifier;
use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub tokens: Arc<TokenVerifier>,
    pub probes: Arc<[Arc<dyn HealthProbe>]>,
}

impl AppState {
    pub fn new(
        user_service: Arc<dyn UserService>,
        tokens: TokenVerifier,
        probes: Vec<Arc<dyn HealthProbe>>,
    ) -> Self {
        Self {
            user_service,
            tokens: Arc::new(tokens),
            probes: probes.into(),
        }
    }
}
