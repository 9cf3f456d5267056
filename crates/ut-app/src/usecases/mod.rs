pub mod load_catalog;
pub mod translator;

pub use load_catalog::LoadCatalog;
