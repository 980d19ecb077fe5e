//! Recorded scan facts.
//!
//! A [`ScanEvent`] associates a participant with a scan type name and a
//! timestamp. Clients never read these back directly; they only observe the
//! HTTP status of the write attempt.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::user::UserId;

/// Type-safe scan event identifier (UUID v4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanEventId(uuid::Uuid);

impl ScanEventId {
    /// Creates a new random `ScanEventId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `ScanEventId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for ScanEventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recorded check-in/scan fact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEvent {
    /// Event identifier.
    pub id: ScanEventId,
    /// Scanned participant.
    pub user_id: UserId,
    /// Name of the claimed scan type.
    pub scan_name: String,
    /// Server-side timestamp of the write.
    pub scanned_at: DateTime<Utc>,
}

impl ScanEvent {
    /// Creates a new event stamped with the current time.
    #[must_use]
    pub fn new(user_id: UserId, scan_name: impl Into<String>) -> Self {
        Self {
            id: ScanEventId::new(),
            user_id,
            scan_name: scan_name.into(),
            scanned_at: Utc::now(),
        }
    }
}

/// Append-only in-memory log of recorded scans.
#[derive(Debug, Default)]
pub struct ScanLog {
    events: RwLock<Vec<ScanEvent>>,
}

impl ScanLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event.
    pub async fn append(&self, event: ScanEvent) {
        self.events.write().await.push(event);
    }

    /// Returns the total number of recorded scans.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn event_ids_are_unique() {
        let a = ScanEvent::new(UserId::from("u1"), "Lunch");
        let b = ScanEvent::new(UserId::from("u1"), "Lunch");
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn log_appends() {
        let log = ScanLog::new();
        assert!(log.is_empty().await);
        log.append(ScanEvent::new(UserId::from("u1"), "Lunch")).await;
        log.append(ScanEvent::new(UserId::from("u2"), "Lunch")).await;
        assert_eq!(log.len().await, 2);
    }

    #[test]
    fn serde_round_trip() {
        let event = ScanEvent::new(UserId::from("u1"), "Day 1 Check-in");
        let json = serde_json::to_string(&event).ok();
        let Some(json) = json else {
            panic!("serialization failed");
        };
        assert!(json.contains("\"scanName\""));
        let parsed: Option<ScanEvent> = serde_json::from_str(&json).ok();
        let Some(parsed) = parsed else {
            panic!("deserialization failed");
        };
        assert_eq!(parsed, event);
    }
}
