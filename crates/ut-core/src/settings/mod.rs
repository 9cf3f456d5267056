pub mod defaults;
pub mod model;

pub use model::{ServiceSettings, Settings, TranslatorSettings, CURRENT_SCHEMA_VERSION};
