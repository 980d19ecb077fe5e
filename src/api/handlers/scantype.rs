//! Scan type registry handlers: list, create, update, delete.
//!
//! Every mutation requires a bearer token carrying `super_admin`; the
//! backend re-validates this independently of any client-side gating.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateScanTypeRequest, ScanTypeEnvelope};
use crate::app_state::AppState;
use crate::auth::{AuthUser, Permission, SCAN_DESK_ROLES};
use crate::domain::ScanType;
use crate::error::{MsgBody, PortalError};

/// `GET /api/scantypes` — List scan types ordered by precedence.
///
/// # Errors
///
/// Returns [`PortalError::Forbidden`] without a scanning-desk permission.
#[utoipa::path(
    get,
    path = "/api/scantypes",
    tag = "Scan Types",
    summary = "List scan types",
    responses(
        (status = 200, description = "Scan types ordered by precedence", body = Vec<ScanType>),
        (status = 403, description = "Missing permission", body = MsgBody),
    )
)]
pub async fn list_scan_types(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(SCAN_DESK_ROLES)?;
    Ok(Json(state.service.list_scan_types().await))
}

/// `POST /api/scan/create` — Create a scan type.
///
/// The server assigns `precedence` equal to the current count, matching
/// the value the admin client computes for its optimistic update.
///
/// # Errors
///
/// Returns [`PortalError`] on missing permission, an incoherent window, a
/// duplicate name, or a second check-in flag.
#[utoipa::path(
    post,
    path = "/api/scan/create",
    tag = "Scan Types",
    summary = "Create a scan type",
    request_body = CreateScanTypeRequest,
    responses(
        (status = 201, description = "Scan type created", body = ScanType),
        (status = 400, description = "Validation failed", body = MsgBody),
        (status = 403, description = "Missing super_admin permission", body = MsgBody),
    )
)]
pub async fn create_scan_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateScanTypeRequest>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(&[Permission::SuperAdmin])?;
    let record = state.service.create_scan_type(req.draft).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// `POST /api/scan/update` — Update a scan type in place.
///
/// The record is matched by `precedence`, which is preserved unchanged.
///
/// # Errors
///
/// Returns [`PortalError`] on missing permission, an unknown record, or a
/// validation failure.
#[utoipa::path(
    post,
    path = "/api/scan/update",
    tag = "Scan Types",
    summary = "Update a scan type",
    request_body = ScanTypeEnvelope,
    responses(
        (status = 200, description = "Scan type updated", body = ScanType),
        (status = 400, description = "Validation failed", body = MsgBody),
        (status = 403, description = "Missing super_admin permission", body = MsgBody),
        (status = 404, description = "Unknown scan type", body = MsgBody),
    )
)]
pub async fn update_scan_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScanTypeEnvelope>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(&[Permission::SuperAdmin])?;
    let record = state.service.update_scan_type(req.scan_data).await?;
    Ok(Json(record))
}

/// `POST /api/scan/delete` — Delete a scan type.
///
/// The check-in scan type is protected: the server refuses the deletion
/// even though the admin client also guards it locally.
///
/// # Errors
///
/// Returns [`PortalError`] on missing permission, an unknown record, or
/// an attempt to delete the check-in scan type.
#[utoipa::path(
    post,
    path = "/api/scan/delete",
    tag = "Scan Types",
    summary = "Delete a scan type",
    request_body = ScanTypeEnvelope,
    responses(
        (status = 200, description = "Scan type deleted", body = ScanType),
        (status = 400, description = "Check-in scan type cannot be deleted", body = MsgBody),
        (status = 403, description = "Missing super_admin permission", body = MsgBody),
        (status = 404, description = "Unknown scan type", body = MsgBody),
    )
)]
pub async fn delete_scan_type(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ScanTypeEnvelope>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(&[Permission::SuperAdmin])?;
    let removed = state
        .service
        .delete_scan_type(req.scan_data.precedence)
        .await?;
    Ok(Json(removed))
}

/// Scan type registry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/scantypes", get(list_scan_types))
        .route("/scan/create", post(create_scan_type))
        .route("/scan/update", post(update_scan_type))
        .route("/scan/delete", post(delete_scan_type))
}
