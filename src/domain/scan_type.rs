//! Scan type records.
//!
//! A [`ScanType`] is a named scan category: time-bounded or permanent, and
//! optionally flagged as the canonical event check-in. Field names serialize
//! in camelCase to match the portal's wire format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A named scan category managed through the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanType {
    /// Unique human-readable name (e.g. `"Day 1 Check-in"`).
    pub name: String,

    /// Whether this scan type is the canonical event check-in. The
    /// check-in scan type is protected from deletion.
    pub is_check_in: bool,

    /// If `true`, no time window applies.
    pub is_permanent_scan: bool,

    /// Window start; meaningful only when not permanent.
    pub start_time: DateTime<Utc>,

    /// Window end; meaningful only when not permanent.
    pub end_time: DateTime<Utc>,

    /// Ordering index assigned as the registry size at creation time.
    /// Append-only: never reassigned, preserved across edits.
    pub precedence: u32,
}

/// Scan type fields without a precedence — the shape submitted by the
/// add/edit forms before an ordering index is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanTypeDraft {
    /// Unique human-readable name.
    pub name: String,
    /// Whether this scan type is the canonical event check-in.
    pub is_check_in: bool,
    /// If `true`, no time window applies.
    pub is_permanent_scan: bool,
    /// Window start.
    pub start_time: DateTime<Utc>,
    /// Window end.
    pub end_time: DateTime<Utc>,
}

impl ScanTypeDraft {
    /// Promotes the draft to a full record with the given ordering index.
    #[must_use]
    pub fn into_scan_type(self, precedence: u32) -> ScanType {
        ScanType {
            name: self.name,
            is_check_in: self.is_check_in,
            is_permanent_scan: self.is_permanent_scan,
            start_time: self.start_time,
            end_time: self.end_time,
            precedence,
        }
    }

    /// Returns `true` if the time window is coherent: permanent scans have
    /// no window, otherwise the start must not come after the end.
    #[must_use]
    pub fn window_valid(&self) -> bool {
        self.is_permanent_scan || self.start_time <= self.end_time
    }
}

impl ScanType {
    /// Returns the record's fields without its precedence.
    #[must_use]
    pub fn draft(&self) -> ScanTypeDraft {
        ScanTypeDraft {
            name: self.name.clone(),
            is_check_in: self.is_check_in,
            is_permanent_scan: self.is_permanent_scan,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }

    /// Returns `true` if the time window is coherent. See
    /// [`ScanTypeDraft::window_valid`].
    #[must_use]
    pub fn window_valid(&self) -> bool {
        self.draft().window_valid()
    }

    /// Returns `true` if `at` falls past the scan window. Always `false`
    /// for permanent scans.
    #[must_use]
    pub fn window_elapsed(&self, at: DateTime<Utc>) -> bool {
        !self.is_permanent_scan && at > self.end_time
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft(start_h: u32, end_h: u32, permanent: bool) -> ScanTypeDraft {
        let day = |h| {
            Utc.with_ymd_and_hms(2025, 11, 1, h, 0, 0)
                .single()
                .unwrap_or_default()
        };
        ScanTypeDraft {
            name: "Lunch".to_string(),
            is_check_in: false,
            is_permanent_scan: permanent,
            start_time: day(start_h),
            end_time: day(end_h),
        }
    }

    #[test]
    fn window_validity() {
        assert!(draft(10, 12, false).window_valid());
        assert!(!draft(12, 10, false).window_valid());
        // Permanent scans ignore the window entirely
        assert!(draft(12, 10, true).window_valid());
    }

    #[test]
    fn promotion_assigns_precedence() {
        let record = draft(10, 12, false).into_scan_type(3);
        assert_eq!(record.precedence, 3);
        assert_eq!(record.name, "Lunch");
    }

    #[test]
    fn window_elapsed_respects_permanence() {
        let record = draft(10, 12, false).into_scan_type(0);
        let late = Utc
            .with_ymd_and_hms(2025, 11, 1, 13, 0, 0)
            .single()
            .unwrap_or_default();
        assert!(record.window_elapsed(late));
        assert!(!record.window_elapsed(record.start_time));

        let permanent = draft(10, 12, true).into_scan_type(0);
        assert!(!permanent.window_elapsed(late));
    }

    #[test]
    fn serializes_in_camel_case() {
        let record = draft(10, 12, false).into_scan_type(0);
        let json = serde_json::to_string(&record).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"isCheckIn\""));
        assert!(json.contains("\"isPermanentScan\""));
        assert!(json.contains("\"startTime\""));
        assert!(json.contains("\"precedence\""));
    }
}
