//! Facade trait for driving the translator
//! 驱动翻译器的门面接口

use async_trait::async_trait;

use crate::models::TranslatorSnapshot;
use ut_core::language::LanguageId;
use ut_core::TextField;

/// Everything a presentation layer may ask the translator to do.
/// 展示层可以要求翻译器执行的全部操作。
///
/// Methods return once the resulting state transition has been applied and
/// its immediate actions executed. Deferred work (the quiescence timer, the
/// network round trip, speech playback) continues in the background and
/// surfaces through [`TranslatorEventPort`](super::TranslatorEventPort).
#[async_trait]
pub trait TranslatorFacade: Send + Sync {
    /// Load the language catalog and initialize the selection.
    async fn start(&self) -> anyhow::Result<()>;

    /// Replace the draft text. Called once per keystroke.
    async fn edit_draft(&self, text: String) -> anyhow::Result<()>;

    /// Select the source language. Unknown ids are ignored.
    async fn select_source(&self, id: LanguageId) -> anyhow::Result<()>;

    /// Select the target language. Unknown ids are ignored.
    async fn select_target(&self, id: LanguageId) -> anyhow::Result<()>;

    /// Exchange languages and texts in one step.
    async fn swap(&self) -> anyhow::Result<()>;

    /// Copy the given field's text to the system clipboard.
    async fn copy(&self, field: TextField) -> anyhow::Result<()>;

    /// Speak the given field's text aloud.
    async fn speak(&self, field: TextField) -> anyhow::Result<()>;

    /// Current view of the translator for rendering.
    async fn snapshot(&self) -> anyhow::Result<TranslatorSnapshot>;
}
