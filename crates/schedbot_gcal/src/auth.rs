// File: crates/schedbot_gcal/src/auth.rs
use async_trait::async_trait;
use tracing::debug;
use yup_oauth2::{
    authenticator::DefaultAuthenticator, parse_service_account_key, ServiceAccountAuthenticator,
};

use crate::error::GcalError;

/// Read/write access to calendars; the only scope the adapter asks for.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar";

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Supplies bearer tokens for Calendar API requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, GcalError>;
}

/// Tokens minted from a service-account key.
///
/// The authenticator caches tokens and refreshes them when they expire.
pub struct ServiceAccountTokens {
    authenticator: DefaultAuthenticator,
}

impl ServiceAccountTokens {
    /// Build a session from the bytes of a service-account JSON document.
    ///
    /// No network call is made here; the first token is fetched on first use.
    pub async fn from_key_bytes(key_bytes: &[u8]) -> Result<Self, GcalError> {
        let key = parse_service_account_key(key_bytes).map_err(GcalError::Session)?;

        match key.key_type.as_deref() {
            Some(SERVICE_ACCOUNT_TYPE) => {}
            other => return Err(GcalError::NotServiceAccount(other.unwrap_or("").to_string())),
        }
        debug!("Using service account {}", key.client_email);

        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(GcalError::Session)?;

        Ok(Self { authenticator })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, GcalError> {
        let token = self.authenticator.token(&[CALENDAR_SCOPE]).await?;
        token
            .token()
            .map(str::to_string)
            .ok_or(GcalError::MissingToken)
    }
}

/// A fixed bearer token, for local testing against a stub server.
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<String, GcalError> {
        Ok(self.0.clone())
    }
}
