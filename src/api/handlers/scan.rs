//! Scan write handler: `POST /api/scan`.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ScanIdQuery, ScanRequest, ScanResponse};
use crate::app_state::AppState;
use crate::auth::{AuthUser, SCAN_DESK_ROLES};
use crate::domain::UserId;
use crate::error::{MsgBody, PortalError};

/// `POST /api/scan?id=<identifier>` — Record a check-in/scan event.
///
/// The response status is the contract with the scanning client's status
/// resolver: 200 claimed, 201 already claimed, 400 late-check-in
/// ineligible, 403 not checked in, 404 unknown user.
///
/// # Errors
///
/// Returns [`PortalError`] on missing permission or an unknown scan type.
#[utoipa::path(
    post,
    path = "/api/scan",
    tag = "Scans",
    summary = "Record a scan",
    description = "Records a check-in/scan event for the identified participant. The status code encodes the outcome.",
    params(ScanIdQuery),
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan claimed", body = ScanResponse),
        (status = 201, description = "Already claimed", body = ScanResponse),
        (status = 400, description = "Late check-in ineligible or unknown scan type", body = MsgBody),
        (status = 403, description = "Not checked in, or missing permission", body = MsgBody),
        (status = 404, description = "Unknown user", body = MsgBody),
    )
)]
pub async fn record_scan(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ScanIdQuery>,
    Json(req): Json<ScanRequest>,
) -> Result<impl IntoResponse, PortalError> {
    auth.require_any(SCAN_DESK_ROLES)?;

    // The client mirrors the identifier in the query string; the body wins.
    let id = if req.id.is_empty() {
        query.id.unwrap_or_default()
    } else {
        req.id
    };

    let user_id = UserId::from(id);
    let decision = state.service.record_scan(&user_id, &req.scan).await?;
    Ok((decision.status_code(), Json(ScanResponse::from(decision))))
}

/// Scan write routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/scan", post(record_scan))
}
