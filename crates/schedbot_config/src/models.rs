// --- File: crates/schedbot_config/src/models.rs ---

use serde::Deserialize;
use std::fmt;

use crate::env_vars::PRODUCTION;
use crate::secrets::{resolve_credential_bytes, CredentialError};

/// Process-wide settings, resolved once at startup and passed around by value
/// or behind an `Arc`.
#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_env: String,
    pub http_port: String,
    #[serde(rename = "tz")]
    pub timezone: String,
    pub gcal_calendar_id: String,
    // base64 blob, file path, or inline service-account JSON
    pub google_creds_json: String,
    // Supabase and Redis are carried for the health summary only
    pub supabase_url: String,
    pub supabase_key: String,
    pub redis_url: String,
}

impl Settings {
    pub fn is_production(&self) -> bool {
        self.app_env == PRODUCTION
    }

    pub fn has_google_creds(&self) -> bool {
        !self.google_creds_json.is_empty()
    }

    /// Both halves needed to build a calendar adapter are present.
    pub fn has_calendar_access(&self) -> bool {
        !self.gcal_calendar_id.is_empty() && self.has_google_creds()
    }

    /// Resolve the credential field into raw service-account bytes.
    pub fn google_credentials(&self) -> Result<Vec<u8>, CredentialError> {
        resolve_credential_bytes(&self.google_creds_json)
    }
}

// Secrets never reach the logs through `{:?}`.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_env", &self.app_env)
            .field("http_port", &self.http_port)
            .field("timezone", &self.timezone)
            .field("gcal_calendar_id", &self.gcal_calendar_id)
            .field("google_creds_json", &redacted(&self.google_creds_json))
            .field("supabase_url", &self.supabase_url)
            .field("supabase_key", &redacted(&self.supabase_key))
            .field("redis_url", &self.redis_url)
            .finish()
    }
}

fn redacted(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}
