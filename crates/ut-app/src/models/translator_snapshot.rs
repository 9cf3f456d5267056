//! Read model handed to the presentation layer.

use serde::Serialize;

use ut_core::language::Language;
use ut_core::TranslatorState;

/// Point-in-time view of the translator, safe to render without touching
/// the state machine again.
/// 翻译器的即时视图,渲染时无需再次访问状态机。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorSnapshot {
    pub state: TranslatorState,
    /// Catalog in service order.
    pub languages: Vec<Language>,
    /// `None` until the catalog has loaded with at least one language.
    pub source: Option<Language>,
    pub target: Option<Language>,
    pub draft: String,
    pub result: String,
}
