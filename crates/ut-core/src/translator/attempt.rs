use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RequestToken;
use crate::language::LanguageId;

/// Lifecycle of a single translation attempt.
///
/// A keystroke schedules an attempt behind the quiescence window; a newer
/// keystroke cancels it; the attempt that survives the window goes in flight
/// and terminates exactly once: applied, discarded as stale, or failed.
///
/// 单次翻译尝试的生命周期。终态只会出现一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttemptPhase {
    /// Keystroke received, attempt queued behind the quiescence window.
    Scheduled,
    /// Quiescence window armed and counting down.
    Debounced,
    /// Superseded by a newer keystroke before the window elapsed.
    Cancelled,
    /// Request issued, response outstanding.
    Inflight,
    /// Response accepted into the result text.
    Applied,
    /// Response arrived after its token was retired.
    Discarded,
    /// Request or parse failed; token retired without a result update.
    Failed,
}

/// An attempt still waiting out its quiescence window. No token exists yet;
/// tokens are minted only when an attempt actually executes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTranslation {
    pub generation: u64,
    pub phase: AttemptPhase,
}

impl PendingTranslation {
    pub fn debounced(generation: u64) -> Self {
        Self {
            generation,
            phase: AttemptPhase::Debounced,
        }
    }
}

/// An executed attempt: the minted token plus the draft and selection captured
/// at execution time. Kept until its token is retired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationAttempt {
    pub token: RequestToken,
    pub text: String,
    pub source: LanguageId,
    pub target: LanguageId,
    pub issued_at: DateTime<Utc>,
    pub phase: AttemptPhase,
}

impl TranslationAttempt {
    pub fn inflight(
        token: RequestToken,
        text: String,
        source: LanguageId,
        target: LanguageId,
        issued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token,
            text,
            source,
            target,
            issued_at,
            phase: AttemptPhase::Inflight,
        }
    }
}
