//! User handlers: operator-facing user info, registration, statistics.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{RegisterUserRequest, UserInfoQuery, UserInfoResponse};
use crate::app_state::AppState;
use crate::auth::{AuthUser, Permission, SCAN_DESK_ROLES, STATS_ROLES};
use crate::domain::{UserId, UserRecord};
use crate::error::{MsgBody, PortalError};
use crate::service::ScanStats;

/// `GET /api/userinfo?id=<identifier>` — Read-only participant projection.
///
/// Fetched by the scanning client after every dispatch purely for operator
/// display; it has no effect on the scan's recorded outcome.
///
/// # Errors
///
/// Returns [`PortalError::NotFound`] for an unregistered identifier.
#[utoipa::path(
    get,
    path = "/api/userinfo",
    tag = "Users",
    summary = "Get participant info",
    params(UserInfoQuery),
    responses(
        (status = 200, description = "Participant projection", body = UserInfoResponse),
        (status = 403, description = "Missing permission", body = MsgBody),
        (status = 404, description = "Unknown user", body = MsgBody),
    )
)]
pub async fn user_info(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UserInfoQuery>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(SCAN_DESK_ROLES)?;
    let user = state
        .service
        .user_info(&UserId::from(query.id))
        .await
        .ok_or_else(|| PortalError::NotFound("user".to_string()))?;
    Ok(Json(UserInfoResponse::from(user)))
}

/// `POST /api/users` — Register a participant record.
///
/// # Errors
///
/// Returns [`PortalError`] on missing permission or a duplicate
/// identifier.
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    summary = "Register a participant",
    request_body = RegisterUserRequest,
    responses(
        (status = 201, description = "Participant registered"),
        (status = 400, description = "Duplicate identifier", body = MsgBody),
        (status = 403, description = "Missing super_admin permission", body = MsgBody),
    )
)]
pub async fn register_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<RegisterUserRequest>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(&[Permission::SuperAdmin])?;
    state.service.register_user(UserRecord::from(req)).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /api/stats` — Scan statistics for the admin dashboard.
///
/// # Errors
///
/// Returns [`PortalError::Forbidden`] without an admin permission.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Users",
    summary = "Scan statistics",
    responses(
        (status = 200, description = "Claim counts per scan type", body = ScanStats),
        (status = 403, description = "Missing permission", body = MsgBody),
    )
)]
pub async fn stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(STATS_ROLES)?;
    Ok(Json(state.service.stats().await))
}

/// User and statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/userinfo", get(user_info))
        .route("/users", post(register_user))
        .route("/stats", get(stats))
}
