//! Language catalog endpoint
//!
//! `GET {base}/api/languages` returns `{"data": [{"id", "name", ...}]}`.
//! Only `id` and `name` are consumed; the service also sends timestamps.

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use ut_core::language::Language;
use ut_core::ports::{LanguageCatalogPort, ServiceError};

use super::client::{map_request_error, ApiClient};

#[derive(Debug, Deserialize)]
struct LanguagesEnvelope {
    data: Vec<LanguageRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageRecord {
    id: String,
    name: String,

    #[serde(default)]
    #[allow(dead_code)]
    created_at: Option<String>,

    #[serde(default)]
    #[allow(dead_code)]
    updated_at: Option<String>,
}

impl From<LanguageRecord> for Language {
    fn from(record: LanguageRecord) -> Self {
        Language::new(record.id, record.name)
    }
}

pub struct HttpLanguageCatalog {
    api: ApiClient,
}

impl HttpLanguageCatalog {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl LanguageCatalogPort for HttpLanguageCatalog {
    async fn fetch_languages(&self) -> Result<Vec<Language>, ServiceError> {
        let url = self.api.url("/api/languages");
        debug!("fetching language catalog: {}", url);

        let response = self
            .api
            .http()
            .get(&url)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(map_request_error)?;

        let envelope: LanguagesEnvelope = response.json().await.map_err(map_request_error)?;
        let languages: Vec<Language> = envelope.data.into_iter().map(Language::from).collect();

        debug!("language catalog loaded: {} entries", languages.len());
        Ok(languages)
    }
}
