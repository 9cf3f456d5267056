//! Speech synthesis port - abstracts text-to-speech playback
//!
//! Speech is fire-and-forget: the caller never waits for playback and
//! never hears about playback failures. Implementations log and move on.

use anyhow::Result;
use async_trait::async_trait;

use crate::language::LanguageId;

#[async_trait]
pub trait SpeechSynthesisPort: Send + Sync {
    /// Speak `text` aloud. `language` selects the voice when given,
    /// otherwise the platform default voice is used.
    async fn speak(&self, text: String, language: Option<LanguageId>) -> Result<()>;
}
