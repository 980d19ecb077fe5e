//! Scan and scan-type DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ScanType, ScanTypeDraft};
use crate::service::ScanDecision;

/// Request body for `POST /api/scan`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanRequest {
    /// Participant identifier extracted from the hacker tag.
    pub id: String,
    /// Name of the active scan type.
    pub scan: String,
}

/// Query parameters for `POST /api/scan`.
///
/// The identifier is carried redundantly in the query string by the
/// scanning client; the body is authoritative.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct ScanIdQuery {
    /// Participant identifier (wire-compat duplicate of the body field).
    #[serde(default)]
    pub id: Option<String>,
}

/// Response body for `POST /api/scan`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScanResponse {
    /// Short operator-facing message.
    pub msg: String,
}

impl From<ScanDecision> for ScanResponse {
    fn from(decision: ScanDecision) -> Self {
        Self {
            msg: decision.message().to_string(),
        }
    }
}

/// Request body for `POST /api/scan/create`.
///
/// The add form submits its fields together with the precedence it expects
/// the new record to receive. The server assigns the authoritative value
/// (the current count) itself; the submitted one is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanTypeRequest {
    /// Scan type fields.
    #[serde(flatten)]
    pub draft: ScanTypeDraft,
    /// Client-computed precedence; not trusted.
    #[serde(default)]
    pub precedence: Option<u32>,
}

/// Request body for `POST /api/scan/update` and `POST /api/scan/delete`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanTypeEnvelope {
    /// The full scan type record, including its current precedence.
    pub scan_data: ScanType,
}
