//! Operator-side scanning client.
//!
//! This module is the desk half of the portal: it turns camera frames into
//! dispatched scans and keeps a local mirror of the scan-type registry.
//!
//! - [`frame`] — frame acquisition behind the [`FrameSource`] seam
//! - [`decoder`] — QR localization and decoding ([`QrDecoder`])
//! - [`scanner`] — the Scanning/Detected/Idle session state machine
//! - [`dispatcher`] — payload validation and the write-then-read dispatch
//! - [`registry`] — the scan-type management client
//! - [`outcome`] — status-code to operator-feedback mapping

pub mod decoder;
pub mod dispatcher;
pub mod frame;
pub mod outcome;
pub mod registry;
pub mod scanner;

pub use decoder::{DecodedSymbol, DecoderConfig, Point, QrDecoder, SymbolDecoder};
pub use dispatcher::{HttpScanApi, ScanApi, ScanDispatcher, ScanReport};
pub use frame::{Frame, FrameSource, ReplayFrameSource};
pub use outcome::ScanOutcome;
pub use registry::{HttpRegistryApi, RegistryApi, ScanTypeClient};
pub use scanner::{ScanPhase, ScanSession};

/// Errors surfaced by the scanning client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A frame buffer did not match its declared dimensions.
    #[error("frame buffer of {len} bytes does not match {width}x{height}")]
    FrameGeometry {
        /// Declared frame width.
        width: usize,
        /// Declared frame height.
        height: usize,
        /// Actual buffer length.
        len: usize,
    },

    /// The frame source was closed and can deliver no more frames.
    #[error("frame source is closed")]
    SourceClosed,

    /// Transport-level HTTP failure.
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected a request with an error body.
    #[error("server returned {status}: {msg}")]
    Api {
        /// HTTP status the server answered with.
        status: reqwest::StatusCode,
        /// Message from the response body.
        msg: String,
    },

    /// Attempted to delete the check-in scan type.
    #[error("the check-in scan type cannot be deleted")]
    CheckInProtected,

    /// A scan-type form carried an end time before its start time.
    #[error("scan type end time precedes its start time")]
    InvalidDateRange,

    /// A registry operation named an index with no local record.
    #[error("no scan type at index {0}")]
    UnknownScanType(usize),
}
