use serde::{Deserialize, Serialize};

use super::{Language, LanguageCatalog};

/// The selected source/target language pair, kept valid as a unit.
///
/// Both ends always refer to catalog entries. Source and target stay distinct
/// whenever the catalog offers at least two languages: selecting for one end
/// the language currently held by the other end swaps the ends instead of
/// collapsing the pair. A single-entry catalog is the one case where both
/// ends legitimately point at the same language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    source: Language,
    target: Language,
}

impl LanguagePair {
    /// Initial selection policy: first catalog entry translates into the last.
    pub fn from_catalog(catalog: &LanguageCatalog) -> Option<Self> {
        let source = catalog.first()?.clone();
        let target = catalog.last()?.clone();
        Some(Self { source, target })
    }

    pub fn source(&self) -> &Language {
        &self.source
    }

    pub fn target(&self) -> &Language {
        &self.target
    }

    /// Replaces the source language. Picking the current target swaps the ends.
    pub fn with_source(&self, candidate: Language) -> Self {
        if candidate.id == self.target.id && candidate.id != self.source.id {
            return self.swapped();
        }
        Self {
            source: candidate,
            target: self.target.clone(),
        }
    }

    /// Replaces the target language. Picking the current source swaps the ends.
    pub fn with_target(&self, candidate: Language) -> Self {
        if candidate.id == self.source.id && candidate.id != self.target.id {
            return self.swapped();
        }
        Self {
            source: self.source.clone(),
            target: candidate,
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}
