use std::io;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Google Calendar client not initialized")]
    NotInitialized,
    #[error("{0}")]
    InvalidInput(String),
    #[error("failed to {action}: {source}")]
    Calendar {
        action: &'static str,
        #[source]
        source: BoxError,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn calendar(action: &'static str, source: impl Into<BoxError>) -> Self {
        CliError::Calendar {
            action,
            source: source.into(),
        }
    }
}
