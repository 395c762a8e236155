use schedbot_config::CredentialError;
use std::io;
use thiserror::Error;

/// Errors that can occur when talking to Google Calendar.
///
/// Remote failures carry the operation they happened in, e.g.
/// `failed to update calendar event: Google API returned 404: Not Found`.
#[derive(Error, Debug)]
pub enum GcalError {
    #[error("failed to get Google credentials: {0}")]
    Credentials(#[from] CredentialError),
    #[error("failed to create service account session: {0}")]
    Session(#[source] io::Error),
    #[error("credentials 'type' field is {0:?} (expected \"service_account\")")]
    NotServiceAccount(String),
    #[error("failed to obtain access token: {0}")]
    Token(#[from] yup_oauth2::Error),
    #[error("access token response did not contain a token")]
    MissingToken,
    #[error("failed to {operation}: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to {operation}: Google API returned {status}: {message}")]
    Api {
        operation: &'static str,
        status: u16,
        message: String,
    },
    #[error("failed to {operation}: {detail}")]
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },
}

impl GcalError {
    /// HTTP status returned by Google, for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            GcalError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self.status(), Some(404) | Some(410))
    }
}
