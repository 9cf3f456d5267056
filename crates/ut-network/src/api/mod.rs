mod client;
mod languages;
mod translate;

pub use client::ApiClient;
pub use languages::HttpLanguageCatalog;
pub use translate::HttpTranslationService;
