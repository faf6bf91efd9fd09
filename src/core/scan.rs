//! Scan backend interface
//!
//! The backend takes a sky region and returns field stars plus the objects
//! its model flags as anomalous. Transport details stay behind
//! [`ScanService`]; the rest of the crate only sees success or failure.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::domain::{ScanResult, View};

/// Request body for `POST /scan`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    pub ra: f64,
    pub dec: f64,
    pub radius: f64,
    pub limit: u32,
}

impl ScanRequest {
    pub fn for_view(view: &View, limit: u32) -> Self {
        Self {
            ra: view.center_ra(),
            dec: view.center_dec(),
            radius: view.radius_deg(),
            limit,
        }
    }
}

/// Why a scan did not produce a result
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScanError {
    /// Request could not be sent or the connection failed
    #[error("transport error: {0}")]
    Transport(String),
    /// Backend answered with a non-success status
    #[error("backend error (status {status}): {message}")]
    Backend { status: u16, message: String },
    /// Response body was not a scan result
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Something that can run a scan
pub trait ScanService: Send + Sync + 'static {
    fn scan(
        &self,
        request: ScanRequest,
    ) -> impl Future<Output = Result<ScanResult, ScanError>> + Send;
}

/// Path of the scan endpoint relative to the backend base URL
pub const SCAN_PATH: &str = "/scan";

impl From<reqwest::Error> for ScanError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ScanError::Decode(err.to_string())
        } else {
            ScanError::Transport(err.to_string())
        }
    }
}

/// Scan backend reached over HTTP with a JSON body
#[derive(Debug, Clone)]
pub struct HttpScanClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpScanClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn scan_url(&self) -> String {
        format!("{}{}", self.base_url, SCAN_PATH)
    }
}

impl ScanService for HttpScanClient {
    async fn scan(&self, request: ScanRequest) -> Result<ScanResult, ScanError> {
        let url = self.scan_url();
        log::debug!("POST {} {:?}", url, request);
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ScanError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let result = response.json::<ScanResult>().await?;
        Ok(result)
    }
}
