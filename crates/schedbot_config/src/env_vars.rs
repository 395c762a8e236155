//! Environment variable names and defaults read by the settings loader.
//!
//! Every setting is a plain string. A variable that is unset or set to the
//! empty string falls back to the default listed in [`ENV_DEFAULTS`].

use std::env;

pub const APP_ENV: &str = "APP_ENV";
pub const HTTP_PORT: &str = "HTTP_PORT";
pub const TZ: &str = "TZ";
pub const GCAL_CALENDAR_ID: &str = "GCAL_CALENDAR_ID";
pub const GOOGLE_CREDS_JSON: &str = "GOOGLE_CREDS_JSON";
pub const SUPABASE_URL: &str = "SUPABASE_URL";
pub const SUPABASE_KEY: &str = "SUPABASE_KEY";
pub const REDIS_URL: &str = "REDIS_URL";

/// The `APP_ENV` value that switches on required-field validation.
pub const PRODUCTION: &str = "production";

/// Variable name and fallback value, in load order.
pub const ENV_DEFAULTS: [(&str, &str); 8] = [
    (APP_ENV, "development"),
    (HTTP_PORT, "8080"),
    (TZ, "UTC"),
    (GCAL_CALENDAR_ID, ""),
    (GOOGLE_CREDS_JSON, ""),
    (SUPABASE_URL, ""),
    (SUPABASE_KEY, ""),
    (REDIS_URL, "redis://localhost:6379"),
];

/// Convert a variable name to the key used inside the `config` builder.
///
/// The `config` crate lowercases environment keys, so `GCAL_CALENDAR_ID`
/// becomes `gcal_calendar_id`.
pub fn config_key(var: &str) -> String {
    var.to_lowercase()
}

/// Returns `true` if `name` is one of the variables the loader reads.
pub fn is_known_var(name: &str) -> bool {
    ENV_DEFAULTS.iter().any(|(var, _)| *var == name)
}

/// Snapshot the known variables from the process environment.
///
/// Unrelated variables (PATH, HOME, ...) are left out so they never reach the
/// config builder.
pub fn collect_process_vars() -> config::Map<String, String> {
    env::vars().filter(|(name, _)| is_known_var(name)).collect()
}
