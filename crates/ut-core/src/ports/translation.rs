//! Translation service ports - abstract the remote translation API
//!
//! These ports define the interface for the two calls the translator makes:
//! loading the language catalog and translating a piece of text.

use async_trait::async_trait;

use crate::language::{Language, LanguageId};
use crate::ports::errors::ServiceError;

/// Language catalog port - abstracts the language listing endpoint
///
/// The catalog is fetched once per session. Callers decide how to degrade
/// when the fetch fails; implementations only report the failure.
#[async_trait]
pub trait LanguageCatalogPort: Send + Sync {
    /// Fetch the list of supported languages.
    async fn fetch_languages(&self) -> Result<Vec<Language>, ServiceError>;
}

/// Translation port - abstracts the translation endpoint
#[async_trait]
pub trait TranslationServicePort: Send + Sync {
    /// Translate `text` from `source` to `target`, returning the translated text.
    async fn translate(
        &self,
        text: &str,
        source: &LanguageId,
        target: &LanguageId,
    ) -> Result<String, ServiceError>;
}
