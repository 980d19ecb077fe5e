//! Bearer token authorization.
//!
//! Every admin endpoint requires an `Authorization` header carrying a bearer
//! token. Tokens map to a permission list; the backend re-validates the
//! required permission on every request regardless of any client-side gating.

use std::collections::HashMap;
use std::fmt;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};

use crate::app_state::AppState;
use crate::error::PortalError;

/// Admin permission levels recognized by the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Full access including scan-type registry mutations.
    SuperAdmin,
    /// Event administration and statistics.
    Admin,
    /// Scanning-desk access.
    Organizer,
}

impl Permission {
    /// Returns the wire string for this permission.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Organizer => "organizer",
        }
    }

    /// Parses a wire string into a permission.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Self::SuperAdmin),
            "admin" => Some(Self::Admin),
            "organizer" => Some(Self::Organizer),
            _ => None,
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permissions required for the scanning desk endpoints.
pub const SCAN_DESK_ROLES: &[Permission] = &[
    Permission::SuperAdmin,
    Permission::Admin,
    Permission::Organizer,
];

/// Permissions required for the statistics endpoint.
pub const STATS_ROLES: &[Permission] = &[Permission::SuperAdmin, Permission::Admin];

/// In-memory map from bearer token to the permissions it carries.
///
/// Loaded once at startup from configuration; see
/// [`TokenStore::from_spec`] for the accepted format.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: HashMap<String, Vec<Permission>>,
}

impl TokenStore {
    /// Builds a store from explicit token/permission pairs.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Vec<Permission>)>) -> Self {
        Self {
            tokens: entries.into_iter().collect(),
        }
    }

    /// Parses a configuration string of the form
    /// `token1=super_admin|organizer,token2=admin`.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if an entry is missing the
    /// `=` separator or names an unknown permission.
    pub fn from_spec(spec: &str) -> Result<Self, PortalError> {
        let mut tokens = HashMap::new();
        for entry in spec.split(',').filter(|e| !e.trim().is_empty()) {
            let (token, perms) = entry.trim().split_once('=').ok_or_else(|| {
                PortalError::InvalidRequest(format!("malformed token entry: {entry}"))
            })?;
            let mut parsed = Vec::new();
            for perm in perms.split('|') {
                let perm = Permission::parse(perm.trim()).ok_or_else(|| {
                    PortalError::InvalidRequest(format!("unknown permission: {perm}"))
                })?;
                parsed.push(perm);
            }
            tokens.insert(token.to_string(), parsed);
        }
        Ok(Self { tokens })
    }

    /// Resolves a bearer token to its permission list.
    #[must_use]
    pub fn authorize(&self, token: &str) -> Option<&[Permission]> {
        self.tokens.get(token).map(Vec::as_slice)
    }

    /// Returns the number of registered tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if no tokens are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Authenticated operator extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Permissions carried by the presented token.
    pub permissions: Vec<Permission>,
}

impl AuthUser {
    /// Returns `true` if the operator holds the given permission.
    #[must_use]
    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    /// Requires at least one of the given permissions.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::Forbidden`] if none are held.
    pub fn require_any(&self, any_of: &[Permission]) -> Result<(), PortalError> {
        if any_of.iter().any(|p| self.has(*p)) {
            Ok(())
        } else {
            Err(PortalError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = PortalError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(PortalError::Unauthorized)?;

        // The original tooling sends the raw token; tolerate a `Bearer` prefix.
        let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();

        let permissions = state
            .token_store
            .authorize(token)
            .ok_or(PortalError::Unauthorized)?
            .to_vec();

        Ok(Self { permissions })
    }
}
