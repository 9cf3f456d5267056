mod translator_snapshot;

pub use translator_snapshot::TranslatorSnapshot;
