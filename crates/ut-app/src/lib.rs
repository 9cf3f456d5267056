//! Application orchestration layer for UniTranslate.
//!
//! Use cases in this crate speak to the outside world exclusively through
//! the port traits defined in `ut-core`. Wire concrete adapters in through
//! [`AppBuilder`].

pub mod builder;
pub mod deps;
pub mod models;
pub mod usecases;

pub use builder::{App, AppBuilder};
pub use deps::AppDeps;
pub use models::TranslatorSnapshot;
pub use usecases::load_catalog::LoadCatalog;
pub use usecases::translator::{
    TranslatorConfig, TranslatorDomainEvent, TranslatorEventPort, TranslatorFacade,
    TranslatorOrchestrator,
};
