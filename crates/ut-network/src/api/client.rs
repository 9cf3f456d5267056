//! Shared HTTP plumbing for the translation service endpoints.

use anyhow::{Context, Result};
use ut_core::ports::ServiceError;
use ut_core::settings::ServiceSettings;

/// One configured `reqwest` client plus the service base address.
///
/// Cheap to clone; both endpoint adapters share the same connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .context("build http client failed")?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn for_base_url(base_url: String) -> Self {
        let settings = ServiceSettings {
            base_url,
            ..ServiceSettings::default()
        };
        Self::new(&settings).unwrap()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Join an absolute endpoint path onto the base address.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Fold a transport-level failure into the service error taxonomy.
///
/// Timeouts, refused connections and bad status codes are network errors;
/// a body that arrived but would not decode is a parse error.
pub(crate) fn map_request_error(error: reqwest::Error) -> ServiceError {
    if error.is_decode() {
        ServiceError::Parse(error.to_string())
    } else if error.is_timeout() {
        ServiceError::Network(format!("request timed out: {}", error))
    } else if let Some(status) = error.status() {
        ServiceError::Network(format!("unexpected status: {}", status))
    } else {
        ServiceError::Network(error.to_string())
    }
}
