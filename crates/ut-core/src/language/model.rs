use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque identifier of a translatable language, as issued by the service.
///
/// Doubles as the tag handed to the speech synthesizer ("en", "fr", ...).
/// This provides type safety and prevents mixing with free-form text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageId(String);

impl LanguageId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for LanguageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LanguageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LanguageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A translatable language: identity plus display label. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: LanguageId,
    pub label: String,
}

impl Language {
    pub fn new(id: impl Into<LanguageId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Ordered set of languages offered by the service.
///
/// Populated at most once per session. Stays empty when the load fails, in
/// which case translation is unavailable for the rest of the session.
/// Language ids are required to be unique within the catalog; lookups return
/// the first match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    pub fn new(languages: Vec<Language>) -> Self {
        Self { languages }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn first(&self) -> Option<&Language> {
        self.languages.first()
    }

    pub fn last(&self) -> Option<&Language> {
        self.languages.last()
    }

    pub fn get(&self, id: &LanguageId) -> Option<&Language> {
        self.languages.iter().find(|language| &language.id == id)
    }

    pub fn contains(&self, id: &LanguageId) -> bool {
        self.get(id).is_some()
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> LanguageCatalog {
        LanguageCatalog::new(vec![
            Language::new("en", "English"),
            Language::new("de", "German"),
            Language::new("fr", "French"),
        ])
    }

    #[test]
    fn test_language_id_creation() {
        let id = LanguageId::new("en".to_string());
        assert_eq!(id.as_str(), "en");
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.first().unwrap().id, LanguageId::from("en"));
        assert_eq!(catalog.last().unwrap().id, LanguageId::from("fr"));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_lookup_by_id() {
        let catalog = sample_catalog();
        let german = catalog.get(&LanguageId::from("de")).unwrap();
        assert_eq!(german.label, "German");
        assert!(!catalog.contains(&LanguageId::from("xx")));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = LanguageCatalog::empty();
        assert!(catalog.is_empty());
        assert!(catalog.first().is_none());
        assert!(catalog.last().is_none());
    }
}
