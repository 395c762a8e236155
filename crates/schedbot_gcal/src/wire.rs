//! Calendar API v3 JSON shapes and the mapping to and from schedbot types.
//!
//! Only the fields the adapter reads or writes are typed. Everything else on
//! an event is kept in `extra` so a fetched event can be written back without
//! losing data the adapter does not know about.

use chrono::{DateTime, SecondsFormat, Utc};
use schedbot_common::{Appointment, TimeBlock, GOOGLE_CALENDAR_SOURCE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, warn};

// --- Free/busy ---

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FreeBusyRequest {
    pub time_min: String,
    pub time_max: String,
    pub items: Vec<FreeBusyRequestItem>,
}

#[derive(Serialize, Debug)]
pub(crate) struct FreeBusyRequestItem {
    pub id: String,
}

impl FreeBusyRequest {
    pub fn for_calendar(calendar_id: &str, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            time_min: format_instant(from),
            time_max: format_instant(to),
            items: vec![FreeBusyRequestItem {
                id: calendar_id.to_string(),
            }],
        }
    }
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct FreeBusyResponse {
    #[serde(default)]
    pub calendars: HashMap<String, FreeBusyCalendar>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct FreeBusyCalendar {
    #[serde(default)]
    pub busy: Vec<TimePeriod>,
    #[serde(default)]
    pub errors: Vec<FreeBusyError>,
}

// Bounds stay strings so one bad timestamp cannot fail the whole response.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct TimePeriod {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct FreeBusyError {
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub reason: String,
}

/// Busy blocks for `calendar_id`, in response order.
///
/// Entries for other calendars are ignored, and a period with a missing or
/// unparsable bound is dropped.
pub(crate) fn busy_blocks(response: FreeBusyResponse, calendar_id: &str) -> Vec<TimeBlock> {
    let mut calendars = response.calendars;
    let Some(calendar) = calendars.remove(calendar_id) else {
        return Vec::new();
    };

    for error in &calendar.errors {
        warn!(
            "Free/busy reported an error for calendar {}: {} ({})",
            calendar_id, error.reason, error.domain
        );
    }

    calendar
        .busy
        .into_iter()
        .filter_map(|period| {
            let start = parse_instant(period.start.as_deref());
            let end = parse_instant(period.end.as_deref());
            match (start, end) {
                (Some(start), Some(end)) => Some(TimeBlock::new(start, end, GOOGLE_CALENDAR_SOURCE)),
                _ => {
                    warn!("Skipping busy period with unusable bounds: {:?}", period);
                    None
                }
            }
        })
        .collect()
}

fn parse_instant(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// --- Events ---

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Event {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<EventAttendee>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub(crate) struct EventAttendee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// RFC 3339 with second precision, `Z` for UTC.
pub(crate) fn format_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn event_time(instant: DateTime<Utc>, timezone: &str) -> EventDateTime {
    EventDateTime {
        date_time: Some(format_instant(instant)),
        date: None,
        time_zone: non_empty(timezone),
    }
}

// The attendee name is not sent: Google only receives the email.
fn attendees_for(appointment: &Appointment) -> Option<Vec<EventAttendee>> {
    appointment.attendee_email().map(|email| {
        vec![EventAttendee {
            email: Some(email.to_string()),
            extra: Map::new(),
        }]
    })
}

/// A new event payload for `appointment`.
pub(crate) fn event_from_appointment(appointment: &Appointment) -> Event {
    let mut event = Event::default();
    apply_appointment(&mut event, appointment);
    event
}

/// Overwrite the mapped fields of a fetched event.
///
/// Summary, description, location, start and end are always replaced; an
/// empty appointment value removes the field. Attendees are replaced only when
/// the appointment has an email, otherwise the existing list stays.
pub(crate) fn apply_appointment(event: &mut Event, appointment: &Appointment) {
    event.summary = non_empty(&appointment.summary);
    event.description = non_empty(&appointment.description);
    event.location = non_empty(&appointment.location);
    event.start = Some(event_time(appointment.start, &appointment.timezone));
    event.end = Some(event_time(appointment.end, &appointment.timezone));
    if let Some(attendees) = attendees_for(appointment) {
        event.attendees = Some(attendees);
    }
}

// --- URLs and errors ---

pub(crate) fn freebusy_url(base_url: &str) -> String {
    format!("{}/freeBusy", base_url.trim_end_matches('/'))
}

pub(crate) fn events_url(base_url: &str, calendar_id: &str) -> String {
    format!(
        "{}/calendars/{}/events",
        base_url.trim_end_matches('/'),
        urlencoding::encode(calendar_id)
    )
}

pub(crate) fn event_url(base_url: &str, calendar_id: &str, event_id: &str) -> String {
    format!(
        "{}/{}",
        events_url(base_url, calendar_id),
        urlencoding::encode(event_id)
    )
}

#[derive(Deserialize, Debug)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize, Debug)]
struct GoogleErrorDetail {
    message: String,
}

/// The `error.message` of a Google error body, or the raw body.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Message for a failed call, from the result of reading its response body.
///
/// A body that cannot be read is logged and treated as empty.
pub(crate) fn error_body_message<E: Display>(operation: &str, body: Result<String, E>) -> String {
    match body {
        Ok(body) => error_message(&body),
        Err(e) => {
            debug!("Could not read error body for {}: {}", operation, e);
            error_message("")
        }
    }
}
