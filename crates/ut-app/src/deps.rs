//! Dependency bundle consumed by the application runtime.

use std::sync::Arc;

use ut_core::ports::{
    ClockPort, LanguageCatalogPort, SpeechSynthesisPort, SystemClipboardPort,
    TranslationServicePort,
};

/// Every port implementation the application needs, grouped in one place.
/// 应用运行所需的全部端口实现,集中在一个结构里。
///
/// This is a plain bag of `Arc`s rather than a builder: the type signature
/// itself documents what the runtime depends on, and a missing field is a
/// compile error instead of a runtime panic.
/// 这是一个普通的 `Arc` 集合而不是 Builder:类型签名本身就说明了运行时依赖什么,
/// 缺少字段会在编译期报错而不是运行期 panic。
pub struct AppDeps {
    // Translation service dependencies / 翻译服务依赖
    pub catalog: Arc<dyn LanguageCatalogPort>,
    pub translation: Arc<dyn TranslationServicePort>,

    // Side-effect dependencies / 副作用依赖
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub speech: Arc<dyn SpeechSynthesisPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,
}
