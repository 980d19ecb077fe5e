//! Operator feedback mapping.
//!
//! Every dispatch resolves to exactly one [`ScanOutcome`]; the mapping
//! from the write response's status code is total, so the desk overlay is
//! never left blank.

use reqwest::StatusCode;

/// Feedback color for a successful claim.
const SUCCESS_COLOR: &str = "#5fde05";
/// Feedback color for every other outcome.
const FAILURE_COLOR: &str = "#ff0000";

/// The resolved result of one dispatched scan, as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanOutcome {
    /// The scan was recorded against the participant.
    Claimed,
    /// The participant had already claimed this scan type.
    AlreadyClaimed,
    /// The participant never checked in, or is ineligible for a late
    /// check-in that has already been attributed to the 400 case.
    NotCheckedIn,
    /// The check-in window has passed and the participant is not flagged
    /// as eligible for a late check-in.
    LateCheckinIneligible,
    /// No participant matches the scanned identifier.
    InvalidUser,
    /// The payload was not a well-formed hacker tag; nothing was sent.
    InvalidFormat,
    /// Transport failure or a status code outside the known table.
    UnexpectedError,
}

impl ScanOutcome {
    /// Resolves the scan-write response status to an outcome.
    ///
    /// Unknown statuses collapse to [`ScanOutcome::UnexpectedError`]
    /// rather than failing, keeping the mapping total.
    #[must_use]
    pub fn from_write_status(status: StatusCode) -> Self {
        match status {
            StatusCode::OK => Self::Claimed,
            StatusCode::CREATED => Self::AlreadyClaimed,
            StatusCode::BAD_REQUEST => Self::LateCheckinIneligible,
            StatusCode::FORBIDDEN => Self::NotCheckedIn,
            StatusCode::NOT_FOUND => Self::InvalidUser,
            _ => Self::UnexpectedError,
        }
    }

    /// Operator-facing message for this outcome.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            Self::Claimed => "Scan claimed...",
            Self::AlreadyClaimed => "User has already claimed...",
            Self::NotCheckedIn => "User hasn't checked in!",
            Self::LateCheckinIneligible => "User is not eligible for late check-in...",
            Self::InvalidUser => "Invalid user...",
            Self::InvalidFormat => "Invalid hacker tag format...",
            Self::UnexpectedError => "Unexpected error...",
        }
    }

    /// Overlay color: green only for a successful claim.
    #[must_use]
    pub fn color(&self) -> &'static str {
        if self.is_success() {
            SUCCESS_COLOR
        } else {
            FAILURE_COLOR
        }
    }

    /// Whether this outcome represents a recorded scan.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Claimed)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn status_table_matches_the_wire_contract() {
        assert_eq!(
            ScanOutcome::from_write_status(StatusCode::OK),
            ScanOutcome::Claimed
        );
        assert_eq!(
            ScanOutcome::from_write_status(StatusCode::CREATED),
            ScanOutcome::AlreadyClaimed
        );
        assert_eq!(
            ScanOutcome::from_write_status(StatusCode::BAD_REQUEST),
            ScanOutcome::LateCheckinIneligible
        );
        assert_eq!(
            ScanOutcome::from_write_status(StatusCode::FORBIDDEN),
            ScanOutcome::NotCheckedIn
        );
        assert_eq!(
            ScanOutcome::from_write_status(StatusCode::NOT_FOUND),
            ScanOutcome::InvalidUser
        );
    }

    #[test]
    fn unknown_statuses_collapse_to_unexpected() {
        for status in [
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::IM_A_TEAPOT,
        ] {
            assert_eq!(
                ScanOutcome::from_write_status(status),
                ScanOutcome::UnexpectedError
            );
        }
    }

    #[test]
    fn only_a_claim_is_green() {
        let all = [
            ScanOutcome::Claimed,
            ScanOutcome::AlreadyClaimed,
            ScanOutcome::NotCheckedIn,
            ScanOutcome::LateCheckinIneligible,
            ScanOutcome::InvalidUser,
            ScanOutcome::InvalidFormat,
            ScanOutcome::UnexpectedError,
        ];
        for outcome in all {
            if outcome == ScanOutcome::Claimed {
                assert_eq!(outcome.color(), "#5fde05");
                assert!(outcome.is_success());
            } else {
                assert_eq!(outcome.color(), "#ff0000");
                assert!(!outcome.is_success());
            }
            assert!(!outcome.message().is_empty());
        }
    }
}
