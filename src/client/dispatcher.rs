//! Scan dispatch: payload validation, the scan write, and the follow-up
//! participant read.
//!
//! The dispatch sequence is fixed: validate the tag prefix locally, post
//! the scan, then read the participant record regardless of how the write
//! resolved. Only a malformed tag (nothing sent) or a transport failure on
//! the write skips the read.

use reqwest::StatusCode;

use super::ClientError;
use super::outcome::ScanOutcome;
use crate::api::dto::{ScanRequest, ScannedUserDto, UserInfoResponse};
use crate::domain::HackerTag;

/// Transport seam for the two calls a dispatch makes.
#[allow(async_fn_in_trait)]
pub trait ScanApi {
    /// Posts one scan attempt and returns the response status.
    ///
    /// Every status is a valid answer here; only transport failures are
    /// errors.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] when the request itself fails.
    async fn record_scan(&self, user_id: &str, scan_name: &str) -> Result<StatusCode, ClientError>;

    /// Fetches the participant record for the scanned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] on transport failure and
    /// [`ClientError::Api`] when the server answers with an error body.
    async fn user_info(&self, user_id: &str) -> Result<ScannedUserDto, ClientError>;
}

/// `reqwest`-backed [`ScanApi`] against a running portal.
#[derive(Debug, Clone)]
pub struct HttpScanApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpScanApi {
    /// Creates a transport against `base_url`, authenticating every call
    /// with `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }
}

impl ScanApi for HttpScanApi {
    async fn record_scan(&self, user_id: &str, scan_name: &str) -> Result<StatusCode, ClientError> {
        let response = self
            .client
            .post(format!("{}/api/scan", self.base_url))
            .query(&[("id", user_id)])
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(&ScanRequest {
                id: user_id.to_string(),
                scan: scan_name.to_string(),
            })
            .send()
            .await?;
        Ok(response.status())
    }

    async fn user_info(&self, user_id: &str) -> Result<ScannedUserDto, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/userinfo", self.base_url))
            .query(&[("id", user_id)])
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let msg = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, msg });
        }

        let body: UserInfoResponse = response.json().await?;
        Ok(body.data.user)
    }
}

/// The fully resolved result of one dispatched payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanReport {
    /// The raw payload that was decoded.
    pub payload: String,
    /// Operator-facing outcome.
    pub outcome: ScanOutcome,
    /// Participant record from the follow-up read, when it succeeded.
    pub user: Option<ScannedUserDto>,
}

/// Turns decoded payloads into [`ScanReport`]s for a fixed scan type.
#[derive(Debug)]
pub struct ScanDispatcher<A> {
    api: A,
    scan_name: String,
}

impl<A: ScanApi> ScanDispatcher<A> {
    /// Creates a dispatcher that attributes every scan to `scan_name`.
    #[must_use]
    pub fn new(api: A, scan_name: impl Into<String>) -> Self {
        Self {
            api,
            scan_name: scan_name.into(),
        }
    }

    /// The scan type this dispatcher attributes scans to.
    #[must_use]
    pub fn scan_name(&self) -> &str {
        &self.scan_name
    }

    /// Dispatches one decoded payload.
    ///
    /// Malformed tags resolve locally without touching the network. A
    /// transport failure on the write resolves to an unexpected-error
    /// outcome and skips the read. Otherwise the participant read always
    /// runs, and its own failure is swallowed — the outcome is already
    /// decided by the write.
    pub async fn dispatch(&self, payload: &str) -> ScanReport {
        let Some(tag) = HackerTag::parse(payload) else {
            return ScanReport {
                payload: payload.to_string(),
                outcome: ScanOutcome::InvalidFormat,
                user: None,
            };
        };

        let status = match self.api.record_scan(tag.identifier(), &self.scan_name).await {
            Ok(status) => status,
            Err(_) => {
                return ScanReport {
                    payload: payload.to_string(),
                    outcome: ScanOutcome::UnexpectedError,
                    user: None,
                };
            }
        };

        let user = self.api.user_info(tag.identifier()).await.ok();

        ScanReport {
            payload: payload.to_string(),
            outcome: ScanOutcome::from_write_status(status),
            user,
        }
    }
}
