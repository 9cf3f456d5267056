//! Settings assembly
//!
//! Settings are never persisted. Every run assembles them from compiled-in
//! defaults with environment overrides layered on top, e.g.
//! `UT__SERVICE__BASE_URL=http://192.168.1.20:3000`.

use anyhow::{Context, Result};
use config::{Config, Environment};
use tracing::debug;
use ut_core::settings::Settings;

const ENV_PREFIX: &str = "UT";
const ENV_SEPARATOR: &str = "__";

pub fn load_settings() -> Result<Settings> {
    let defaults =
        Config::try_from(&Settings::default()).context("collect default settings failed")?;

    let settings: Settings = Config::builder()
        .add_source(defaults)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR),
        )
        .build()
        .context("assemble settings failed")?
        .try_deserialize()
        .context("deserialize settings failed")?;

    debug!(base_url = %settings.service.base_url, "settings assembled");
    Ok(settings)
}
