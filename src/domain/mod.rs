//! Domain layer: scan types, participants, recorded scans, and the hacker
//! tag payload format.
//!
//! This module contains the server-side domain model: the scan-type registry
//! with its append-only precedence ordering, the participant directory, the
//! scan event log, and the `hack:` tag contract shared with the scanner
//! client.

pub mod scan_event;
pub mod scan_registry;
pub mod scan_type;
pub mod tag;
pub mod user;

pub use scan_event::{ScanEvent, ScanEventId, ScanLog};
pub use scan_registry::ScanTypeRegistry;
pub use scan_type::{ScanType, ScanTypeDraft};
pub use tag::{HackerTag, TAG_PREFIX};
pub use user::{UserDirectory, UserId, UserRecord};
