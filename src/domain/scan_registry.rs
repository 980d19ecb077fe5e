//! Scan type storage with append-only ordering.
//!
//! [`ScanTypeRegistry`] holds all configured scan types behind a
//! [`tokio::sync::RwLock`]. Creation appends with `precedence` equal to the
//! current count; deletion never renumbers survivors, so precedence values
//! are stable identifiers across the lifetime of the event.

use tokio::sync::RwLock;

use super::scan_type::{ScanType, ScanTypeDraft};
use crate::error::PortalError;

/// Central store for all configured scan types.
///
/// # Invariants
///
/// - Names are unique.
/// - At most one scan type carries `is_check_in`.
/// - `precedence` is assigned at creation and never changes, including
///   across edits and deletions of other records.
#[derive(Debug, Default)]
pub struct ScanTypeRegistry {
    scan_types: RwLock<Vec<ScanType>>,
}

impl ScanTypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry pre-populated with existing records, e.g. loaded
    /// from the persistence layer at startup.
    #[must_use]
    pub fn with_scan_types(mut scan_types: Vec<ScanType>) -> Self {
        scan_types.sort_by_key(|s| s.precedence);
        Self {
            scan_types: RwLock::new(scan_types),
        }
    }

    /// Returns all scan types ordered by precedence.
    pub async fn list(&self) -> Vec<ScanType> {
        self.scan_types.read().await.clone()
    }

    /// Returns the scan type with the given name, if any.
    pub async fn get(&self, name: &str) -> Option<ScanType> {
        self.scan_types
            .read()
            .await
            .iter()
            .find(|s| s.name == name)
            .cloned()
    }

    /// Returns the name of the check-in scan type, if one is configured.
    pub async fn check_in_name(&self) -> Option<String> {
        self.scan_types
            .read()
            .await
            .iter()
            .find(|s| s.is_check_in)
            .map(|s| s.name.clone())
    }

    /// Appends a new scan type, assigning `precedence` equal to the
    /// current count.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if the time window is
    /// incoherent, the name is already taken, or the draft claims the
    /// check-in flag while another record already holds it.
    pub async fn create(&self, draft: ScanTypeDraft) -> Result<ScanType, PortalError> {
        if !draft.window_valid() {
            return Err(PortalError::InvalidRequest("invalid date range".to_string()));
        }

        let mut scan_types = self.scan_types.write().await;
        if scan_types.iter().any(|s| s.name == draft.name) {
            return Err(PortalError::InvalidRequest(format!(
                "scan type {} already exists",
                draft.name
            )));
        }
        if draft.is_check_in && scan_types.iter().any(|s| s.is_check_in) {
            return Err(PortalError::InvalidRequest(
                "a check-in scan type already exists".to_string(),
            ));
        }

        let precedence = u32::try_from(scan_types.len())
            .map_err(|_| PortalError::Internal("scan type count overflow".to_string()))?;
        let record = draft.into_scan_type(precedence);
        scan_types.push(record.clone());
        Ok(record)
    }

    /// Replaces the record sharing `updated.precedence`, preserving that
    /// precedence regardless of what the caller submitted for other fields.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if no record carries the given
    /// precedence, or [`PortalError::InvalidRequest`] on an incoherent
    /// window, a name collision, or a second check-in flag.
    pub async fn update(&self, updated: ScanType) -> Result<ScanType, PortalError> {
        if !updated.window_valid() {
            return Err(PortalError::InvalidRequest("invalid date range".to_string()));
        }

        let mut scan_types = self.scan_types.write().await;
        if scan_types
            .iter()
            .any(|s| s.name == updated.name && s.precedence != updated.precedence)
        {
            return Err(PortalError::InvalidRequest(format!(
                "scan type {} already exists",
                updated.name
            )));
        }
        if updated.is_check_in
            && scan_types
                .iter()
                .any(|s| s.is_check_in && s.precedence != updated.precedence)
        {
            return Err(PortalError::InvalidRequest(
                "a check-in scan type already exists".to_string(),
            ));
        }

        let slot = scan_types
            .iter_mut()
            .find(|s| s.precedence == updated.precedence)
            .ok_or_else(|| PortalError::NotFound("scan type".to_string()))?;
        *slot = updated.clone();
        Ok(updated)
    }

    /// Removes the record with the given precedence, returning it.
    /// Survivors keep their precedence values — no gap filling.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::NotFound`] if no record carries the given
    /// precedence, or [`PortalError::InvalidRequest`] if the target is the
    /// protected check-in scan type.
    pub async fn delete(&self, precedence: u32) -> Result<ScanType, PortalError> {
        let mut scan_types = self.scan_types.write().await;
        let idx = scan_types
            .iter()
            .position(|s| s.precedence == precedence)
            .ok_or_else(|| PortalError::NotFound("scan type".to_string()))?;

        let protected = scan_types.get(idx).is_some_and(|s| s.is_check_in);
        if protected {
            return Err(PortalError::InvalidRequest(
                "check-in scan type cannot be deleted".to_string(),
            ));
        }
        Ok(scan_types.remove(idx))
    }

    /// Returns the number of configured scan types.
    pub async fn len(&self) -> usize {
        self.scan_types.read().await.len()
    }

    /// Returns `true` if no scan types are configured.
    pub async fn is_empty(&self) -> bool {
        self.scan_types.read().await.is_empty()
    }
}
