// --- File: crates/schedbot_gcal/src/lib.rs ---
pub mod auth;
pub mod error;
pub mod service;
mod wire;
#[cfg(test)]
mod wire_test;

pub use auth::{ServiceAccountTokens, StaticToken, TokenProvider, CALENDAR_SCOPE};
pub use error::GcalError;
pub use service::{GoogleCalendarAdapter, GOOGLE_CALENDAR_API_BASE};
