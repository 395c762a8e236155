// --- File: crates/schedbot_common/src/services.rs ---
//! Calendar service abstraction.
//!
//! The application talks to calendars only through [`CalendarAdapter`]. There
//! is one real backend (Google Calendar, in `schedbot-gcal`); tests plug in
//! their own implementation of the same four operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Source tag put on every busy block read from Google Calendar.
pub const GOOGLE_CALENDAR_SOURCE: &str = "google_calendar";

/// A busy interval `[start, end)` and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub source: String,
}

impl TimeBlock {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, source: impl Into<String>) -> Self {
        Self {
            start,
            end,
            source: source.into(),
        }
    }
}

/// An event to be written to the calendar.
///
/// `end` is expected to be after `start`; callers are responsible for that.
/// `timezone` is an IANA label sent alongside both instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub summary: String,
    #[serde(default)]
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Kept for callers; calendar backends do not transmit it.
    #[serde(default)]
    pub attendee_name: Option<String>,
    #[serde(default)]
    pub attendee_email: Option<String>,
    #[serde(default)]
    pub location: String,
    pub timezone: String,
}

impl Appointment {
    /// The attendee email, if there is a non-empty one.
    pub fn attendee_email(&self) -> Option<&str> {
        self.attendee_email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Calendar operations used by the backend and the CLI.
///
/// Each call is one round trip to the backing calendar; nothing is retried or
/// cached.
pub trait CalendarAdapter: Send + Sync {
    /// Error type returned by calendar operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Busy blocks overlapping `[from, to)`, in the order the backend reports them.
    fn list_busy(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<TimeBlock>, Self::Error>;

    /// Create an event and return its identifier.
    fn create_event(&self, appointment: Appointment) -> BoxFuture<'_, String, Self::Error>;

    /// Overwrite an existing event with the appointment's fields.
    fn update_event(
        &self,
        event_id: &str,
        appointment: Appointment,
    ) -> BoxFuture<'_, (), Self::Error>;

    /// Delete an event.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error>;
}
