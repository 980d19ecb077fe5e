//! User-related DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{UserId, UserRecord};

/// Query parameters for `GET /api/userinfo`.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserInfoQuery {
    /// Participant identifier.
    pub id: String,
}

/// Read-only participant projection shown to the scanning operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScannedUserDto {
    /// Participant identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Permission strings.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Contact email.
    pub preferred_email: String,
}

impl From<UserRecord> for ScannedUserDto {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            permissions: user.permissions,
            preferred_email: user.preferred_email,
        }
    }
}

/// Inner `{user: ...}` wrapper of the user-info response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfileDto {
    /// The participant projection.
    pub user: ScannedUserDto,
}

/// Response body for `GET /api/userinfo`: `{data: {user: {...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserInfoResponse {
    /// Wrapped participant projection.
    pub data: UserProfileDto,
}

impl From<UserRecord> for UserInfoResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            data: UserProfileDto {
                user: ScannedUserDto::from(user),
            },
        }
    }
}

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Participant identifier (the tag embeds this after `hack:`).
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub preferred_email: String,
    /// Permission strings.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Late check-in eligibility flag.
    #[serde(default)]
    pub late_checkin_eligible: bool,
}

impl From<RegisterUserRequest> for UserRecord {
    fn from(req: RegisterUserRequest) -> Self {
        Self {
            id: UserId::from(req.id),
            first_name: req.first_name,
            last_name: req.last_name,
            preferred_email: req.preferred_email,
            permissions: req.permissions,
            late_checkin_eligible: req.late_checkin_eligible,
            claimed_scans: Vec::new(),
        }
    }
}
