//! Translator interaction use case
//! 翻译交互用例
//!
//! The state machine in `ut-core` decides what happens; the orchestrator in
//! this module makes it happen. Presentation layers talk to the orchestrator
//! through [`TranslatorFacade`] and observe it through [`TranslatorEventPort`].

pub mod events;
pub mod facade;
pub mod orchestrator;

pub use events::{TranslatorDomainEvent, TranslatorEventPort};
pub use facade::TranslatorFacade;
pub use orchestrator::{TranslatorConfig, TranslatorOrchestrator};
