//! Admin-side scan type management.
//!
//! [`ScanTypeClient`] keeps a local mirror of the registry and applies the
//! server's append-only precedence rules optimistically: every mutation
//! goes to the server first, and the mirror changes only after the server
//! accepts. Two guards run before any network traffic — an incoherent
//! time window and a check-in deletion are refused locally.

use crate::api::dto::{CreateScanTypeRequest, ScanTypeEnvelope};
use crate::domain::{ScanType, ScanTypeDraft};
use crate::error::MsgBody;

use super::ClientError;

/// Transport seam for the registry endpoints.
#[allow(async_fn_in_trait)]
pub trait RegistryApi {
    /// Fetches all scan types, ordered by precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] or [`ClientError::Api`] when the
    /// call fails.
    async fn list(&self) -> Result<Vec<ScanType>, ClientError>;

    /// Submits a new scan type.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the record.
    async fn create(&self, req: &CreateScanTypeRequest) -> Result<(), ClientError>;

    /// Submits an in-place edit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server rejects the edit.
    async fn update(&self, req: &ScanTypeEnvelope) -> Result<(), ClientError>;

    /// Submits a deletion.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the server refuses the deletion.
    async fn delete(&self, req: &ScanTypeEnvelope) -> Result<(), ClientError>;
}

/// `reqwest`-backed [`RegistryApi`] against a running portal.
#[derive(Debug, Clone)]
pub struct HttpRegistryApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpRegistryApi {
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

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let msg = match response.json::<MsgBody>().await {
            Ok(body) => body.msg,
            Err(_) => format!("request failed with status {status}"),
        };
        Err(ClientError::Api { status, msg })
    }

    async fn post_checked<T: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<(), ClientError> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl RegistryApi for HttpRegistryApi {
    async fn list(&self) -> Result<Vec<ScanType>, ClientError> {
        let response = self
            .client
            .get(format!("{}/api/scantypes", self.base_url))
            .header(reqwest::header::AUTHORIZATION, &self.token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn create(&self, req: &CreateScanTypeRequest) -> Result<(), ClientError> {
        self.post_checked("/api/scan/create", req).await
    }

    async fn update(&self, req: &ScanTypeEnvelope) -> Result<(), ClientError> {
        self.post_checked("/api/scan/update", req).await
    }

    async fn delete(&self, req: &ScanTypeEnvelope) -> Result<(), ClientError> {
        self.post_checked("/api/scan/delete", req).await
    }
}

/// Local mirror of the scan-type registry with guarded mutations.
#[derive(Debug)]
pub struct ScanTypeClient<A> {
    api: A,
    scan_types: Vec<ScanType>,
}

impl<A: RegistryApi> ScanTypeClient<A> {
    /// Creates a client with an empty mirror; call [`refresh`] to load.
    ///
    /// [`refresh`]: ScanTypeClient::refresh
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            api,
            scan_types: Vec::new(),
        }
    }

    /// The current local mirror, ordered by precedence.
    #[must_use]
    pub fn scan_types(&self) -> &[ScanType] {
        &self.scan_types
    }

    /// Replaces the mirror with the server's current records.
    ///
    /// # Errors
    ///
    /// Propagates transport and server errors; the mirror is untouched on
    /// failure.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let mut records = self.api.list().await?;
        records.sort_by_key(|record| record.precedence);
        self.scan_types = records;
        Ok(())
    }

    /// Creates a scan type.
    ///
    /// The new record's precedence is the current mirror size; the server
    /// computes the same value independently. The mirror grows only after
    /// the server accepts.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidDateRange`] before any network call
    /// when the window is incoherent, otherwise propagates server errors.
    pub async fn create(&mut self, draft: ScanTypeDraft) -> Result<&ScanType, ClientError> {
        if !draft.window_valid() {
            return Err(ClientError::InvalidDateRange);
        }

        let precedence = u32::try_from(self.scan_types.len()).unwrap_or(u32::MAX);
        let req = CreateScanTypeRequest {
            draft: draft.clone(),
            precedence: Some(precedence),
        };
        self.api.create(&req).await?;

        self.scan_types.push(draft.into_scan_type(precedence));
        self.scan_types
            .last()
            .ok_or(ClientError::UnknownScanType(0))
    }

    /// Edits the record at `index` in place, preserving its precedence.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::UnknownScanType`] for an out-of-range index,
    /// [`ClientError::InvalidDateRange`] for an incoherent window, and
    /// otherwise propagates server errors. The mirror is untouched unless
    /// the server accepts.
    pub async fn update(
        &mut self,
        index: usize,
        draft: ScanTypeDraft,
    ) -> Result<&ScanType, ClientError> {
        if !draft.window_valid() {
            return Err(ClientError::InvalidDateRange);
        }
        let precedence = self
            .scan_types
            .get(index)
            .ok_or(ClientError::UnknownScanType(index))?
            .precedence;

        let record = draft.into_scan_type(precedence);
        let req = ScanTypeEnvelope {
            scan_data: record.clone(),
        };
        self.api.update(&req).await?;

        let slot = self
            .scan_types
            .get_mut(index)
            .ok_or(ClientError::UnknownScanType(index))?;
        *slot = record;
        Ok(&*slot)
    }

    /// Deletes the record at `index`.
    ///
    /// Remaining records keep their precedence values; the sequence simply
    /// gains a gap.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::CheckInProtected`] before any network call
    /// when the record is the check-in scan type, and
    /// [`ClientError::UnknownScanType`] for an out-of-range index. The
    /// mirror shrinks only after the server accepts.
    pub async fn delete(&mut self, index: usize) -> Result<ScanType, ClientError> {
        let record = self
            .scan_types
            .get(index)
            .ok_or(ClientError::UnknownScanType(index))?;
        if record.is_check_in {
            return Err(ClientError::CheckInProtected);
        }

        let req = ScanTypeEnvelope {
            scan_data: record.clone(),
        };
        self.api.delete(&req).await?;

        Ok(self.scan_types.remove(index))
    }
}
