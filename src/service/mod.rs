//! Service layer: business logic for scan writes and registry CRUD.

pub mod checkin_service;

pub use checkin_service::{CheckinService, ScanCount, ScanDecision, ScanStats};
