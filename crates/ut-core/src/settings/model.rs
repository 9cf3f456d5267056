use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// 翻译服务的基础地址,例如 `http://127.0.0.1:3000`
    pub base_url: String,

    /// Per-request timeout for catalog and translation calls.
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorSettings {
    /// 击键后的静默窗口; 窗口内的新击键会取消并重开窗口
    pub debounce_window: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub translator: TranslatorSettings,
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}
