//! Stats lookup client
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use async_trait::async_trait;
use log::debug;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use thiserror::Error;

use super::profile::ProfileRecord;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Gamertag not found: {0}")]
    NotFound(String),

    #[error("Stats service returned status {0}")]
    Status(u16),

    #[error("Invalid stats endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Stats request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Async profile lookup keyed by gamertag
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn lookup(&self, gamertag: &str) -> Result<ProfileRecord, LookupError>;
}

/// HTTP client for the Halo MCC stats endpoint
#[derive(Clone)]
pub struct HaloStatsClient {
    http: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
}

impl HaloStatsClient {
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, LookupError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| LookupError::InvalidEndpoint(format!("{endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(LookupError::InvalidEndpoint(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            endpoint,
            token,
        })
    }
}

#[async_trait]
impl ProfileLookup for HaloStatsClient {
    async fn lookup(&self, gamertag: &str) -> Result<ProfileRecord, LookupError> {
        debug!("Looking up stats for '{gamertag}'");

        let mut request = self
            .http
            .get(self.endpoint.clone())
            .query(&[("gamertag", gamertag)]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(gamertag.to_string()));
        }
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        // The service answers unknown gamertags with a null body
        let profile: Option<ProfileRecord> = response.json().await?;
        profile.ok_or_else(|| LookupError::NotFound(gamertag.to_string()))
    }
}
