// File: crates/services/schedbot_cli/src/commands.rs
//! Command implementations, generic over the calendar backend so they can be
//! run against an in-memory calendar in tests.

use chrono::{DateTime, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use schedbot_common::{Appointment, CalendarAdapter};
use std::io::Write;
use tracing::{debug, warn};

use crate::error::CliError;

/// Input format of `--start` / `--end`.
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";
const TEST_EVENT_SUMMARY: &str = "Test Appointment - Bot Connection";
const TEST_EVENT_DESCRIPTION: &str =
    "This is a test event to verify the service account connection";

/// Unwrap the adapter or fail the command.
pub fn require_adapter<A>(adapter: Option<A>) -> Result<A, CliError> {
    adapter.ok_or(CliError::NotInitialized)
}

/// Parse a `--start` / `--end` value. The wall time is read as UTC.
pub fn parse_event_time(value: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(value, EVENT_TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS ({})", e))
}

/// `[from 00:00Z, day after to 00:00Z)`.
pub fn busy_window(
    from: NaiveDate,
    to: NaiveDate,
) -> Result<(DateTime<Utc>, DateTime<Utc>), CliError> {
    if to < from {
        return Err(CliError::InvalidInput(format!(
            "--to ({}) must not be before --from ({})",
            to, from
        )));
    }
    let end = to
        .checked_add_days(Days::new(1))
        .ok_or_else(|| CliError::InvalidInput(format!("date out of range: {}", to)))?;
    Ok((
        from.and_time(NaiveTime::MIN).and_utc(),
        end.and_time(NaiveTime::MIN).and_utc(),
    ))
}

/// Print the busy blocks of the inclusive date range and return how many
/// there were.
pub async fn list_busy<A, W>(
    adapter: &A,
    from: NaiveDate,
    to: NaiveDate,
    out: &mut W,
) -> Result<usize, CliError>
where
    A: CalendarAdapter,
    W: Write,
{
    let (window_start, window_end) = busy_window(from, to)?;
    debug!("Listing busy blocks in [{}, {})", window_start, window_end);

    let blocks = adapter
        .list_busy(window_start, window_end)
        .await
        .map_err(|e| CliError::calendar("list busy blocks", e))?;

    writeln!(out, "Busy time blocks from {} to {}:", from, to)?;
    if blocks.is_empty() {
        writeln!(out, "No busy blocks found.")?;
    }
    for (i, block) in blocks.iter().enumerate() {
        writeln!(
            out,
            "{}. {} - {} ({})",
            i + 1,
            block.start.format(DISPLAY_FORMAT),
            block.end.format(DISPLAY_FORMAT),
            block.source
        )?;
    }
    Ok(blocks.len())
}

/// Validate the appointment, create it and print the new id.
pub async fn create_event<A, W>(
    adapter: &A,
    appointment: Appointment,
    out: &mut W,
) -> Result<String, CliError>
where
    A: CalendarAdapter,
    W: Write,
{
    if appointment.summary.trim().is_empty() {
        return Err(CliError::InvalidInput("summary is required".to_string()));
    }
    if appointment.end <= appointment.start {
        return Err(CliError::InvalidInput(
            "end time must be after start time".to_string(),
        ));
    }

    let event_id = adapter
        .create_event(appointment)
        .await
        .map_err(|e| CliError::calendar("create event", e))?;

    writeln!(out, "Event created successfully with ID: {}", event_id)?;
    Ok(event_id)
}

/// Outcome of [`check_connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionReport {
    pub busy_blocks: usize,
    /// The test event could be created.
    pub can_write: bool,
    /// Set when the test event was created but could not be removed again.
    pub leftover_event: Option<String>,
}

/// Read busy blocks around `now`, then create and delete a one-hour test event.
///
/// Only the read is required to succeed; a rejected write is reported as a
/// warning since the service account may simply lack write access.
pub async fn check_connection<A, W>(
    adapter: &A,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<ConnectionReport, CliError>
where
    A: CalendarAdapter,
    W: Write,
{
    writeln!(out, "Testing calendar access...")?;
    let blocks = adapter
        .list_busy(now - Duration::hours(24), now + Duration::hours(24))
        .await
        .map_err(|e| CliError::calendar("list busy blocks", e))?;
    writeln!(out, "Calendar access: OK ({} busy blocks in the last and next 24h)", blocks.len())?;

    let mut report = ConnectionReport {
        busy_blocks: blocks.len(),
        can_write: false,
        leftover_event: None,
    };

    writeln!(out, "Testing event creation...")?;
    let test_event = Appointment {
        summary: TEST_EVENT_SUMMARY.to_string(),
        description: TEST_EVENT_DESCRIPTION.to_string(),
        start: now + Duration::hours(1),
        end: now + Duration::hours(2),
        attendee_name: None,
        attendee_email: None,
        location: "Test Location".to_string(),
        timezone: "UTC".to_string(),
    };

    match adapter.create_event(test_event).await {
        Err(e) => {
            warn!("Test event creation failed: {}", e);
            writeln!(out, "Warning: event creation failed: {}", e)?;
            writeln!(
                out,
                "  The service account may not have write access to this calendar yet"
            )?;
        }
        Ok(event_id) => {
            report.can_write = true;
            writeln!(out, "Test event created: {}", event_id)?;
            match adapter.delete_event(&event_id).await {
                Ok(()) => writeln!(out, "Test event cleaned up")?,
                Err(e) => {
                    warn!("Failed to delete test event {}: {}", event_id, e);
                    writeln!(out, "Warning: failed to delete test event {}: {}", event_id, e)?;
                    report.leftover_event = Some(event_id);
                }
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Configuration: OK")?;
    writeln!(out, "Authentication: OK")?;
    writeln!(out, "Calendar access: OK")?;
    if report.can_write {
        writeln!(out, "Write permissions: OK")?;
    } else {
        writeln!(out, "Write permissions: missing (share the calendar with the service account)")?;
    }
    Ok(report)
}
