mod model;
mod pair;

pub use model::{Language, LanguageCatalog, LanguageId};
pub use pair::LanguagePair;
