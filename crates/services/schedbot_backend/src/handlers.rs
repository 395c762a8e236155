// File: crates/services/schedbot_backend/src/handlers.rs
use axum::{
    extract::State,
    http::{Method, Uri},
    Json,
};
use schedbot_config::Settings;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;

/// Settings summary served by `/healthz`. Secrets only show up as booleans.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct HealthSummary {
    pub status: &'static str,
    pub env: String,
    pub http_port: String,
    pub timezone: String,
    pub gcal_calendar_id: String,
    pub has_google_creds: bool,
    pub has_supabase_url: bool,
    pub has_supabase_key: bool,
    pub redis_url: String,
}

impl From<&Settings> for HealthSummary {
    fn from(settings: &Settings) -> Self {
        Self {
            status: "ok",
            env: settings.app_env.clone(),
            http_port: settings.http_port.clone(),
            timezone: settings.timezone.clone(),
            gcal_calendar_id: settings.gcal_calendar_id.clone(),
            has_google_creds: settings.has_google_creds(),
            has_supabase_url: !settings.supabase_url.is_empty(),
            has_supabase_key: !settings.supabase_key.is_empty(),
            redis_url: settings.redis_url.clone(),
        }
    }
}

pub async fn healthz(State(settings): State<Arc<Settings>>) -> Json<HealthSummary> {
    Json(HealthSummary::from(settings.as_ref()))
}

pub async fn not_found(method: Method, uri: Uri) -> ApiError {
    debug!("No route for {} {}", method, uri.path());
    ApiError::NotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
