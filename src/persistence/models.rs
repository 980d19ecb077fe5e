//! Database models for scan types, users, and recorded scans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{ScanEvent, ScanEventId, ScanType, UserId, UserRecord};

/// A scan type row from the `scan_types` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScanType {
    /// Unique scan type name.
    pub name: String,
    /// Check-in flag.
    pub is_check_in: bool,
    /// Permanent-scan flag.
    pub is_permanent_scan: bool,
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
    /// Append-only ordering index.
    pub precedence: i32,
}

impl From<&ScanType> for StoredScanType {
    fn from(scan: &ScanType) -> Self {
        Self {
            name: scan.name.clone(),
            is_check_in: scan.is_check_in,
            is_permanent_scan: scan.is_permanent_scan,
            start_time: scan.start_time,
            end_time: scan.end_time,
            precedence: i32::try_from(scan.precedence).unwrap_or(i32::MAX),
        }
    }
}

impl From<StoredScanType> for ScanType {
    fn from(row: StoredScanType) -> Self {
        Self {
            name: row.name,
            is_check_in: row.is_check_in,
            is_permanent_scan: row.is_permanent_scan,
            start_time: row.start_time,
            end_time: row.end_time,
            precedence: u32::try_from(row.precedence).unwrap_or(0),
        }
    }
}

/// A participant row from the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    /// Participant identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Contact email.
    pub preferred_email: String,
    /// Permission strings.
    pub permissions: Vec<String>,
    /// Late check-in eligibility flag.
    pub late_checkin_eligible: bool,
}

impl From<&UserRecord> for StoredUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            preferred_email: user.preferred_email.clone(),
            permissions: user.permissions.clone(),
            late_checkin_eligible: user.late_checkin_eligible,
        }
    }
}

impl From<StoredUser> for UserRecord {
    fn from(row: StoredUser) -> Self {
        Self {
            id: UserId::from(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            preferred_email: row.preferred_email,
            permissions: row.permissions,
            late_checkin_eligible: row.late_checkin_eligible,
            claimed_scans: Vec::new(),
        }
    }
}

/// A recorded scan row from the `scans` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScan {
    /// Event identifier.
    pub id: Uuid,
    /// Scanned participant.
    pub user_id: String,
    /// Claimed scan type name.
    pub scan_name: String,
    /// Write timestamp.
    pub scanned_at: DateTime<Utc>,
}

impl From<&ScanEvent> for StoredScan {
    fn from(event: &ScanEvent) -> Self {
        Self {
            id: *event.id.as_uuid(),
            user_id: event.user_id.as_str().to_string(),
            scan_name: event.scan_name.clone(),
            scanned_at: event.scanned_at,
        }
    }
}

impl From<StoredScan> for ScanEvent {
    fn from(row: StoredScan) -> Self {
        Self {
            id: ScanEventId::from_uuid(row.id),
            user_id: UserId::from(row.user_id),
            scan_name: row.scan_name,
            scanned_at: row.scanned_at,
        }
    }
}
