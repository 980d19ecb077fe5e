//! Check-in service: orchestrates scan writes and registry mutations.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    ScanEvent, ScanLog, ScanType, ScanTypeDraft, ScanTypeRegistry, UserDirectory, UserId,
    UserRecord,
};
use crate::error::PortalError;
use crate::persistence::PortalPersistence;

/// Outcome of a scan write, mapped one-to-one onto the HTTP status codes
/// the scanning client resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanDecision {
    /// Scan recorded (200).
    Claimed,
    /// Participant already claimed this scan type (201).
    AlreadyClaimed,
    /// Participant has not checked in yet (403).
    NotCheckedIn,
    /// Check-in window closed and the participant is not eligible for
    /// late check-in (400).
    LateCheckinIneligible,
    /// No participant with the scanned identifier (404).
    UnknownUser,
}

impl ScanDecision {
    /// Returns the wire status code for this decision.
    ///
    /// The 201-for-duplicate mapping is a fixed contract with the scanning
    /// client's status resolver.
    #[must_use]
    pub const fn status_code(self) -> StatusCode {
        match self {
            Self::Claimed => StatusCode::OK,
            Self::AlreadyClaimed => StatusCode::CREATED,
            Self::NotCheckedIn => StatusCode::FORBIDDEN,
            Self::LateCheckinIneligible => StatusCode::BAD_REQUEST,
            Self::UnknownUser => StatusCode::NOT_FOUND,
        }
    }

    /// Returns a short operator-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Claimed => "scan claimed",
            Self::AlreadyClaimed => "user has already claimed this scan",
            Self::NotCheckedIn => "user has not checked in",
            Self::LateCheckinIneligible => "user is not eligible for late check-in",
            Self::UnknownUser => "unknown user",
        }
    }
}

/// Per-scan-type claim count for the statistics endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanCount {
    /// Scan type name.
    pub name: String,
    /// Number of participants who claimed it.
    pub count: u64,
}

/// Aggregate scan statistics.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Participants who claimed the check-in scan type.
    pub checked_in: u64,
    /// Total scans recorded since startup.
    pub total_scans: u64,
    /// Claim counts per scan type, ordered by precedence.
    pub scans: Vec<ScanCount>,
}

/// Orchestration layer for scan writes, registry CRUD, and statistics.
///
/// Owns the in-memory stores; every mutation optionally writes through to
/// the persistence layer. Persistence failures are logged and do not fail
/// the request — the in-memory state is authoritative for the event.
#[derive(Debug)]
pub struct CheckinService {
    scan_types: Arc<ScanTypeRegistry>,
    users: Arc<UserDirectory>,
    scan_log: ScanLog,
    persistence: Option<PortalPersistence>,
}

impl CheckinService {
    /// Creates a new `CheckinService`.
    #[must_use]
    pub fn new(
        scan_types: Arc<ScanTypeRegistry>,
        users: Arc<UserDirectory>,
        persistence: Option<PortalPersistence>,
    ) -> Self {
        Self {
            scan_types,
            users,
            scan_log: ScanLog::new(),
            persistence,
        }
    }

    /// Returns a reference to the scan type registry.
    #[must_use]
    pub fn scan_types(&self) -> &Arc<ScanTypeRegistry> {
        &self.scan_types
    }

    /// Returns a reference to the user directory.
    #[must_use]
    pub fn users(&self) -> &Arc<UserDirectory> {
        &self.users
    }

    /// Records a scan attempt for the given participant and scan type.
    ///
    /// Decision order: unknown user → duplicate claim → check-in rules →
    /// claim. Non-check-in scans require a prior check-in claim; check-in
    /// scans past their window require late-check-in eligibility.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if the scan type name is
    /// not configured.
    pub async fn record_scan(
        &self,
        user_id: &UserId,
        scan_name: &str,
    ) -> Result<ScanDecision, PortalError> {
        let scan = self.scan_types.get(scan_name).await.ok_or_else(|| {
            PortalError::InvalidRequest(format!("unknown scan type: {scan_name}"))
        })?;

        let Some(user) = self.users.get(user_id).await else {
            tracing::info!(%user_id, scan_name, "scan rejected: unknown user");
            return Ok(ScanDecision::UnknownUser);
        };

        if user.has_claimed(scan_name) {
            tracing::info!(%user_id, scan_name, "scan rejected: already claimed");
            return Ok(ScanDecision::AlreadyClaimed);
        }

        if scan.is_check_in {
            if scan.window_elapsed(Utc::now()) && !user.late_checkin_eligible {
                tracing::info!(%user_id, scan_name, "scan rejected: late check-in ineligible");
                return Ok(ScanDecision::LateCheckinIneligible);
            }
        } else if let Some(check_in) = self.scan_types.check_in_name().await
            && !user.has_claimed(&check_in)
        {
            tracing::info!(%user_id, scan_name, "scan rejected: not checked in");
            return Ok(ScanDecision::NotCheckedIn);
        }

        self.users.record_claim(user_id, scan_name).await?;
        let event = ScanEvent::new(user_id.clone(), scan_name);
        if let Some(persistence) = &self.persistence
            && let Err(err) = persistence.record_scan(&event).await
        {
            tracing::warn!(%err, "failed to persist scan event");
        }
        self.scan_log.append(event).await;

        tracing::info!(%user_id, scan_name, "scan claimed");
        Ok(ScanDecision::Claimed)
    }

    /// Returns the participant record for operator display.
    pub async fn user_info(&self, user_id: &UserId) -> Option<UserRecord> {
        self.users.get(user_id).await
    }

    /// Registers a new participant.
    ///
    /// # Errors
    ///
    /// Returns [`PortalError::InvalidRequest`] if the identifier is
    /// already registered.
    pub async fn register_user(&self, user: UserRecord) -> Result<(), PortalError> {
        self.users.insert(user.clone()).await?;
        if let Some(persistence) = &self.persistence
            && let Err(err) = persistence.save_user(&user).await
        {
            tracing::warn!(%err, "failed to persist user");
        }
        tracing::info!(user_id = %user.id, "user registered");
        Ok(())
    }

    /// Returns all scan types ordered by precedence.
    pub async fn list_scan_types(&self) -> Vec<ScanType> {
        self.scan_types.list().await
    }

    /// Creates a scan type, assigning the next precedence.
    ///
    /// # Errors
    ///
    /// Propagates registry validation errors; see
    /// [`ScanTypeRegistry::create`].
    pub async fn create_scan_type(&self, draft: ScanTypeDraft) -> Result<ScanType, PortalError> {
        let record = self.scan_types.create(draft).await?;
        if let Some(persistence) = &self.persistence
            && let Err(err) = persistence.save_scan_type(&record).await
        {
            tracing::warn!(%err, "failed to persist scan type");
        }
        tracing::info!(name = %record.name, precedence = record.precedence, "scan type created");
        Ok(record)
    }

    /// Updates a scan type in place; precedence is preserved.
    ///
    /// # Errors
    ///
    /// Propagates registry validation errors; see
    /// [`ScanTypeRegistry::update`].
    pub async fn update_scan_type(&self, updated: ScanType) -> Result<ScanType, PortalError> {
        let record = self.scan_types.update(updated).await?;
        if let Some(persistence) = &self.persistence
            && let Err(err) = persistence.update_scan_type(&record).await
        {
            tracing::warn!(%err, "failed to persist scan type update");
        }
        tracing::info!(name = %record.name, "scan type updated");
        Ok(record)
    }

    /// Deletes a scan type. The check-in scan type is refused.
    ///
    /// # Errors
    ///
    /// Propagates registry errors; see [`ScanTypeRegistry::delete`].
    pub async fn delete_scan_type(&self, precedence: u32) -> Result<ScanType, PortalError> {
        let removed = self.scan_types.delete(precedence).await?;
        if let Some(persistence) = &self.persistence
            && let Err(err) = persistence.delete_scan_type(precedence).await
        {
            tracing::warn!(%err, "failed to persist scan type deletion");
        }
        tracing::info!(name = %removed.name, "scan type deleted");
        Ok(removed)
    }

    /// Computes claim counts per scan type and the checked-in total.
    pub async fn stats(&self) -> ScanStats {
        let scan_types = self.scan_types.list().await;
        let check_in = self.scan_types.check_in_name().await;

        let mut scans = Vec::with_capacity(scan_types.len());
        for scan in &scan_types {
            scans.push(ScanCount {
                name: scan.name.clone(),
                count: self.users.count_claimed(&scan.name).await,
            });
        }

        let checked_in = match &check_in {
            Some(name) => self.users.count_claimed(name).await,
            None => 0,
        };

        ScanStats {
            checked_in,
            total_scans: self.scan_log.len().await as u64,
            scans,
        }
    }
}
