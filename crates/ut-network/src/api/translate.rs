//! Translation endpoint
//!
//! `POST {base}/api/translate/` with `{"word", "from", "to"}`. The service
//! answers `{"data": [{"word", ...}]}` and only the first entry's `word`
//! is consumed.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use ut_core::language::LanguageId;
use ut_core::ports::{ServiceError, TranslationServicePort};

use super::client::{map_request_error, ApiClient};

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    word: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateEnvelope {
    #[serde(default)]
    data: Vec<TranslationRecord>,
}

#[derive(Debug, Deserialize)]
struct TranslationRecord {
    word: String,
}

pub struct HttpTranslationService {
    api: ApiClient,
}

impl HttpTranslationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TranslationServicePort for HttpTranslationService {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageId,
        target: &LanguageId,
    ) -> Result<String, ServiceError> {
        let url = self.api.url("/api/translate/");
        debug!("translating {} -> {}", source, target);

        let request = TranslateRequest {
            word: text,
            from: source.as_str(),
            to: target.as_str(),
        };
        let response = self
            .api
            .http()
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_request_error)?
            .error_for_status()
            .map_err(map_request_error)?;

        let envelope: TranslateEnvelope = response.json().await.map_err(map_request_error)?;
        envelope
            .data
            .into_iter()
            .next()
            .map(|record| record.word)
            .ok_or_else(|| ServiceError::Parse("translation response carried no entries".into()))
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};

    use super::*;

    fn service(server: &Server) -> HttpTranslationService {
        HttpTranslationService::new(ApiClient::for_base_url(server.url()))
    }

    #[tokio::test]
    async fn test_translate_posts_word_and_takes_first_entry() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/translate/")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({
                "word": "hello",
                "from": "en",
                "to": "fr"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data": [
                    {"word": "bonjour", "from": "en", "to": "fr"},
                    {"word": "salut"}
                ]}"#,
            )
            .create_async()
            .await;

        let translated = service(&server)
            .translate("hello", &LanguageId::from("en"), &LanguageId::from("fr"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(translated, "bonjour");
    }

    #[tokio::test]
    async fn test_empty_data_is_a_parse_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/translate/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": []}"#)
            .create_async()
            .await;

        let error = service(&server)
            .translate("hello", &LanguageId::from("en"), &LanguageId::from("fr"))
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::Parse(_)));
    }

    #[tokio::test]
    async fn test_service_failure_maps_to_network() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/translate/")
            .with_status(503)
            .create_async()
            .await;

        let error = service(&server)
            .translate("hello", &LanguageId::from("en"), &LanguageId::from("fr"))
            .await
            .unwrap_err();

        assert!(matches!(error, ServiceError::Network(_)));
    }
}
