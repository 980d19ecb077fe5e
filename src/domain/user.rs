//! Participant records and the in-memory user directory.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::error::PortalError;

/// Opaque participant identifier — the string embedded in a hacker tag
/// after the `hack:` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a `UserId` from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A registered participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Participant identifier.
    pub id: UserId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email shown to the scanning operator.
    pub preferred_email: String,
    /// Permission strings carried over from registration.
    #[serde(default)]
    pub permissions: Vec<String>,
    /// Whether the participant may still check in after the check-in
    /// window has closed.
    #[serde(default)]
    pub late_checkin_eligible: bool,
    /// Names of scan types this participant has already claimed.
    #[serde(default)]
    pub claimed_scans: Vec<String>,
}

impl UserRecord {
    /// Returns `true` if the participant has already claimed the given
    /// scan type.
    #[must_use]
    pub fn has_claimed(&self, scan_name: &str) -> bool {
        self.claimed_scans.iter().any(|s| s == scan_name)
    }
}

/// In-memory directory of registered participants.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<UserId, UserRecord>>,
}

impl UserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory pre-populated with existing records, e.g.
    /// loaded from the persistence layer at startup.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        Self {
            users: RwLock::new(users.into_iter().map(|u| (u.id.clone(), u)).collect()),
        }
    }

    /// Registers a new participant.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if the identifier is
    /// already registered.
    pub async fn insert(&self, user: UserRecord) -> Result<(), PortalError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(PortalError::InvalidRequest(format!(
                "user {} already registered",
                user.id
            )));
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    /// Returns a copy of the participant record, if registered.
    pub async fn get(&self, id: &UserId) -> Option<UserRecord> {
        self.users.read().await.get(id).cloned()
    }

    /// Marks a scan type as claimed by the participant. Idempotent if the
    /// claim is already present.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if the participant is unknown.
    pub async fn record_claim(&self, id: &UserId, scan_name: &str) -> Result<(), PortalError> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(id)
            .ok_or_else(|| PortalError::NotFound("user".to_string()))?;
        if !user.has_claimed(scan_name) {
            user.claimed_scans.push(scan_name.to_string());
        }
        Ok(())
    }

    /// Counts participants who have claimed the given scan type.
    pub async fn count_claimed(&self, scan_name: &str) -> u64 {
        self.users
            .read()
            .await
            .values()
            .filter(|u| u.has_claimed(scan_name))
            .count() as u64
    }

    /// Returns the number of registered participants.
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Returns `true` if no participants are registered.
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
