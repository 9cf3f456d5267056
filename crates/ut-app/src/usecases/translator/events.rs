//! Domain events published by the translator orchestrator
//! 翻译编排器发布的领域事件

use async_trait::async_trait;
use tokio::sync::mpsc;

use ut_core::ids::{NotificationId, RequestToken};
use ut_core::language::Language;
use ut_core::TextField;

/// One-way notifications flowing from the orchestrator to its subscribers.
/// 从编排器单向流向订阅者的通知。
///
/// Subscribers render these events; they never answer them. Anything a
/// subscriber wants changed goes back in through
/// [`TranslatorFacade`](super::TranslatorFacade).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslatorDomainEvent {
    /// Catalog loaded with at least one language; interaction may begin.
    CatalogReady { languages: Vec<Language> },

    /// Catalog could not be loaded; translation stays disabled this session.
    CatalogUnavailable { error: String },

    /// Source or target language changed.
    SelectionChanged { source: Language, target: Language },

    /// A translation response was accepted into the result text.
    ResultUpdated { token: RequestToken, text: String },

    /// A translation attempt failed; the previous result is unchanged.
    TranslationFailed { token: RequestToken, error: String },

    /// Languages and texts were exchanged in one step.
    Swapped {
        draft: String,
        result: String,
        source: Language,
        target: Language,
    },

    /// A clipboard copy finished; show a transient confirmation.
    CopyConfirmed {
        notification_id: NotificationId,
        field: TextField,
        message: String,
    },
}

/// Subscription access to the translator's event stream.
#[async_trait]
pub trait TranslatorEventPort: Send + Sync {
    /// Register a new subscriber and return its receiving end.
    ///
    /// Events are fanned out to every receiver alive at emit time; a dropped
    /// receiver is skipped without disturbing the others.
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<TranslatorDomainEvent>>;
}
