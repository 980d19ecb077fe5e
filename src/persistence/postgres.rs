//! PostgreSQL implementation of the persistence layer.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{StoredScan, StoredScanType, StoredUser};
use crate::domain::{ScanEvent, ScanType, UserRecord};
use crate::error::PortalError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
///
/// The in-memory registries remain the source of truth; this layer is a
/// write-through store used to reload state at startup.
#[derive(Debug, Clone)]
pub struct PortalPersistence {
    pool: PgPool,
}

impl PortalPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the backing tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), PortalError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS scan_types (\
                 name TEXT PRIMARY KEY, \
                 is_check_in BOOLEAN NOT NULL, \
                 is_permanent_scan BOOLEAN NOT NULL, \
                 start_time TIMESTAMPTZ NOT NULL, \
                 end_time TIMESTAMPTZ NOT NULL, \
                 precedence INTEGER NOT NULL UNIQUE\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (\
                 id TEXT PRIMARY KEY, \
                 first_name TEXT NOT NULL, \
                 last_name TEXT NOT NULL, \
                 preferred_email TEXT NOT NULL, \
                 permissions TEXT[] NOT NULL DEFAULT '{}', \
                 late_checkin_eligible BOOLEAN NOT NULL DEFAULT FALSE\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS scans (\
                 id UUID PRIMARY KEY, \
                 user_id TEXT NOT NULL, \
                 scan_name TEXT NOT NULL, \
                 scanned_at TIMESTAMPTZ NOT NULL\
             )",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        Ok(())
    }

    /// Inserts a scan type row.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn save_scan_type(&self, scan: &ScanType) -> Result<(), PortalError> {
        let row = StoredScanType::from(scan);
        sqlx::query(
            "INSERT INTO scan_types (name, is_check_in, is_permanent_scan, start_time, end_time, precedence) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(&row.name)
        .bind(row.is_check_in)
        .bind(row.is_permanent_scan)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(row.precedence)
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Replaces the scan type row sharing the record's precedence.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn update_scan_type(&self, scan: &ScanType) -> Result<(), PortalError> {
        let row = StoredScanType::from(scan);
        sqlx::query(
            "UPDATE scan_types SET name = $1, is_check_in = $2, is_permanent_scan = $3, \
             start_time = $4, end_time = $5 WHERE precedence = $6",
        )
        .bind(&row.name)
        .bind(row.is_check_in)
        .bind(row.is_permanent_scan)
        .bind(row.start_time)
        .bind(row.end_time)
        .bind(row.precedence)
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Deletes the scan type row with the given precedence.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn delete_scan_type(&self, precedence: u32) -> Result<(), PortalError> {
        sqlx::query("DELETE FROM scan_types WHERE precedence = $1")
            .bind(i32::try_from(precedence).unwrap_or(i32::MAX))
            .execute(&self.pool)
            .await
            .map_err(|e| PortalError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Loads all scan types ordered by precedence.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn load_scan_types(&self) -> Result<Vec<ScanType>, PortalError> {
        let rows = sqlx::query_as::<_, (String, bool, bool, DateTime<Utc>, DateTime<Utc>, i32)>(
            "SELECT name, is_check_in, is_permanent_scan, start_time, end_time, precedence \
             FROM scan_types ORDER BY precedence ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(
                |(name, is_check_in, is_permanent_scan, start_time, end_time, precedence)| {
                    ScanType::from(StoredScanType {
                        name,
                        is_check_in,
                        is_permanent_scan,
                        start_time,
                        end_time,
                        precedence,
                    })
                },
            )
            .collect())
    }

    /// Inserts a participant row.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn save_user(&self, user: &UserRecord) -> Result<(), PortalError> {
        let row = StoredUser::from(user);
        sqlx::query(
            "INSERT INTO users (id, first_name, last_name, preferred_email, permissions, late_checkin_eligible) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&row.id)
        .bind(&row.first_name)
        .bind(&row.last_name)
        .bind(&row.preferred_email)
        .bind(&row.permissions)
        .bind(row.late_checkin_eligible)
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Loads all participants, with their claimed scans folded in from the
    /// `scans` table.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn load_users(&self) -> Result<Vec<UserRecord>, PortalError> {
        let rows = sqlx::query_as::<_, (String, String, String, String, Vec<String>, bool)>(
            "SELECT id, first_name, last_name, preferred_email, permissions, late_checkin_eligible \
             FROM users",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        let mut users: Vec<UserRecord> = rows
            .into_iter()
            .map(
                |(id, first_name, last_name, preferred_email, permissions, late)| {
                    UserRecord::from(StoredUser {
                        id,
                        first_name,
                        last_name,
                        preferred_email,
                        permissions,
                        late_checkin_eligible: late,
                    })
                },
            )
            .collect();

        for event in self.load_scans().await? {
            if let Some(user) = users.iter_mut().find(|u| u.id == event.user_id)
                && !user.has_claimed(&event.scan_name)
            {
                user.claimed_scans.push(event.scan_name);
            }
        }

        Ok(users)
    }

    /// Appends a recorded scan.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn record_scan(&self, event: &ScanEvent) -> Result<(), PortalError> {
        let row = StoredScan::from(event);
        sqlx::query(
            "INSERT INTO scans (id, user_id, scan_name, scanned_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(row.id)
        .bind(&row.user_id)
        .bind(&row.scan_name)
        .bind(row.scanned_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;
        Ok(())
    }

    /// Loads all recorded scans in write order.
    ///
    /// # Errors
    ///
    /// Returns a [`PortalError::Persistence`] on database failure.
    pub async fn load_scans(&self) -> Result<Vec<ScanEvent>, PortalError> {
        let rows = sqlx::query_as::<_, (Uuid, String, String, DateTime<Utc>)>(
            "SELECT id, user_id, scan_name, scanned_at FROM scans ORDER BY scanned_at ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortalError::Persistence(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(id, user_id, scan_name, scanned_at)| {
                ScanEvent::from(StoredScan {
                    id,
                    user_id,
                    scan_name,
                    scanned_at,
                })
            })
            .collect())
    }
}
