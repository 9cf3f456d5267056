//! Assembly of the application runtime from its parts.

use std::fmt;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::deps::AppDeps;
use crate::usecases::translator::{TranslatorConfig, TranslatorOrchestrator};
use ut_core::ports::{
    ClockPort, LanguageCatalogPort, SpeechSynthesisPort, SystemClipboardPort,
    TranslationServicePort,
};
use ut_core::settings::Settings;

/// Builder for assembling the application runtime.
/// 组装应用运行时的构建器。
///
/// Adapters are injected one at a time; [`AppBuilder::build`] reports the
/// first missing port by name instead of panicking later.
pub struct AppBuilder {
    settings: Option<Settings>,
    catalog: Option<Arc<dyn LanguageCatalogPort>>,
    translation: Option<Arc<dyn TranslationServicePort>>,
    clipboard: Option<Arc<dyn SystemClipboardPort>>,
    speech: Option<Arc<dyn SpeechSynthesisPort>>,
    clock: Option<Arc<dyn ClockPort>>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self {
            settings: None,
            catalog: None,
            translation: None,
            clipboard: None,
            speech: None,
            clock: None,
        }
    }

    /// Settings are optional; [`Settings::default`] applies when omitted.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_language_catalog(mut self, catalog: Arc<dyn LanguageCatalogPort>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn with_translation_service(mut self, translation: Arc<dyn TranslationServicePort>) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn SystemClipboardPort>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesisPort>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn build(self) -> Result<App> {
        let settings = self.settings.unwrap_or_default();
        let deps = AppDeps {
            catalog: self
                .catalog
                .ok_or_else(|| anyhow!("language catalog port is required"))?,
            translation: self
                .translation
                .ok_or_else(|| anyhow!("translation service port is required"))?,
            clipboard: self
                .clipboard
                .ok_or_else(|| anyhow!("clipboard port is required"))?,
            speech: self
                .speech
                .ok_or_else(|| anyhow!("speech synthesis port is required"))?,
            clock: self.clock.ok_or_else(|| anyhow!("clock port is required"))?,
        };
        Ok(App::new(settings, deps))
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully wired application runtime.
/// 装配完成的应用运行时。
pub struct App {
    pub settings: Settings,
    pub translator: TranslatorOrchestrator,
}

impl App {
    /// Construct the runtime from a complete dependency bundle.
    /// 从完整的依赖集合构造运行时。
    ///
    /// The [`AppDeps`] signature is the dependency manifest: adding a port
    /// there forces every call site to provide it.
    pub fn new(settings: Settings, deps: AppDeps) -> Self {
        let translator = TranslatorOrchestrator::new(
            TranslatorConfig::from_settings(&settings),
            deps.catalog,
            deps.translation,
            deps.clipboard,
            deps.speech,
            deps.clock,
        );
        Self {
            settings,
            translator,
        }
    }
}

/// Manual impl: the orchestrator's port trait objects carry no `Debug` bound.
impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
