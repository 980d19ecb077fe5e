//! REST endpoint handlers organized by resource.

pub mod scan;
pub mod scantype;
pub mod system;
pub mod user;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(scan::routes())
        .merge(scantype::routes())
        .merge(user::routes())
}
