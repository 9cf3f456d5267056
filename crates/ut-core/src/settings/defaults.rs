use std::time::Duration;

use super::model::*;

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            debounce_window: Duration::from_millis(300),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            service: ServiceSettings::default(),
            translator: TranslatorSettings::default(),
        }
    }
}
