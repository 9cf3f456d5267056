//! Language catalog loading use case
//! 语言目录加载用例

use std::sync::Arc;

use tracing::{info, info_span, warn, Instrument};

use ut_core::ports::LanguageCatalogPort;
use ut_core::TranslatorEvent;

/// Use case: fetch the language catalog once at session start.
/// 用例:会话开始时获取一次语言目录。
///
/// ## Behavior / 行为
///
/// - Success yields a [`TranslatorEvent::CatalogLoaded`] carrying the
///   languages in service order.
/// - Failure never propagates: it degrades to
///   [`TranslatorEvent::CatalogLoadFailed`], which leaves the session with
///   an empty catalog and translation disabled.
/// - 成功时返回携带服务端顺序语言列表的 `CatalogLoaded` 事件。
/// - 失败不向上传播:降级为 `CatalogLoadFailed` 事件,
///   本会话目录保持为空,翻译不可用。
pub struct LoadCatalog {
    catalog: Arc<dyn LanguageCatalogPort>,
}

impl LoadCatalog {
    pub fn new(catalog: Arc<dyn LanguageCatalogPort>) -> Self {
        Self { catalog }
    }

    /// Fetch the catalog and fold the outcome into a state machine event.
    pub async fn execute(&self) -> TranslatorEvent {
        let span = info_span!("usecase.load_catalog.execute");
        async {
            match self.catalog.fetch_languages().await {
                Ok(languages) => {
                    info!(count = languages.len(), "language catalog loaded");
                    TranslatorEvent::CatalogLoaded { languages }
                }
                Err(error) => {
                    warn!(%error, "language catalog unavailable, continuing without languages");
                    TranslatorEvent::CatalogLoadFailed {
                        error: error.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
