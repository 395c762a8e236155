//! Settings for schedbot.
//!
//! Everything comes from environment variables (optionally seeded from a local
//! env file, see [`overlay`]). Required fields are enforced only when
//! `APP_ENV=production`; in every other environment a missing value simply
//! falls back to its default.

use config::{Config, Environment};
use thiserror::Error;
use tracing::debug;

pub mod env_vars;
pub mod models;
pub mod overlay;
pub mod secrets;

pub use models::Settings;
pub use overlay::ensure_overlay_loaded;
pub use secrets::{resolve_credential_bytes, CredentialError};

use env_vars::{config_key, ENV_DEFAULTS, GCAL_CALENDAR_ID, GOOGLE_CREDS_JSON};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{var} is required in production")]
    MissingInProduction { var: &'static str },
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Loads settings from the process environment, applying the env-file overlay
/// first.
pub fn load_settings() -> Result<Settings, SettingsError> {
    ensure_overlay_loaded();
    settings_from_vars(env_vars::collect_process_vars())
}

/// Builds settings from an explicit variable map.
///
/// Unset and empty variables both take their default.
pub fn settings_from_vars(vars: config::Map<String, String>) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder();
    for (var, default) in ENV_DEFAULTS {
        builder = builder.set_default(config_key(var), default)?;
    }

    let settings: Settings = builder
        .add_source(Environment::default().source(Some(vars)).ignore_empty(true))
        .build()?
        .try_deserialize()?;

    validate(&settings)?;
    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if !settings.is_production() {
        return Ok(());
    }
    if settings.gcal_calendar_id.is_empty() {
        return Err(SettingsError::MissingInProduction {
            var: GCAL_CALENDAR_ID,
        });
    }
    if settings.google_creds_json.is_empty() {
        return Err(SettingsError::MissingInProduction {
            var: GOOGLE_CREDS_JSON,
        });
    }
    Ok(())
}
