//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::auth::TokenStore;
use crate::service::CheckinService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Check-in service for all business logic.
    pub service: Arc<CheckinService>,
    /// Bearer token to permission mapping.
    pub token_store: Arc<TokenStore>,
}
