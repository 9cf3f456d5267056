//! # ut-network
//!
//! HTTP adapters for the translation service endpoints.

pub mod api;

pub use api::{ApiClient, HttpLanguageCatalog, HttpTranslationService};
