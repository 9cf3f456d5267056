//! # ut-core
//!
//! Core domain models and business logic for UniTranslate.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod ids;
pub mod language;
pub mod ports;
pub mod settings;
pub mod translator;

// Re-export commonly used types at the crate root
pub use ids::{NotificationId, RequestToken};
pub use language::{Language, LanguageCatalog, LanguageId, LanguagePair};
pub use translator::{
    TextField, TranslatorAction, TranslatorEvent, TranslatorPolicy, TranslatorState,
    TranslatorStateMachine,
};
