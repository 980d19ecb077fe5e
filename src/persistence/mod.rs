//! Persistence layer: PostgreSQL write-through for scan types, users, and
//! recorded scans.
//!
//! The in-memory registries are authoritative; the database lets the portal
//! reload registrations and claims across restarts. The concrete
//! implementation uses `sqlx::PgPool` for async PostgreSQL access.

pub mod models;
pub mod postgres;

pub use postgres::PortalPersistence;
