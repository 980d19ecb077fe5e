//! # checkin-gateway
//!
//! Check-in and scan-tracking service for hackathon events, plus the
//! operator-side scanning client that drives it.
//!
//! The server keeps a registry of scan types (check-in, meals, workshops),
//! a directory of registered participants, and a log of claimed scans; it
//! answers every scan attempt with a status code the client resolves to
//! operator feedback. The client half turns camera frames into decoded
//! hacker tags and dispatches them.
//!
//! ## Architecture
//!
//! ```text
//! Scanning desk (client/)
//!     ├── FrameSource ── QrDecoder ── ScanSession
//!     ├── ScanDispatcher ──▶ POST /api/scan, GET /api/userinfo
//!     └── ScanTypeClient ──▶ /api/scantypes, /api/scan/{create,update,delete}
//!
//! Server
//!     ├── REST Handlers (api/)
//!     ├── CheckinService (service/)
//!     ├── ScanTypeRegistry, UserDirectory, ScanLog (domain/)
//!     └── PostgreSQL Persistence (optional)
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
