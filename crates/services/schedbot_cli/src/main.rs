// File: crates/services/schedbot_cli/src/main.rs
mod commands;
#[cfg(test)]
mod commands_test;
mod error;

use chrono::{DateTime, Days, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use schedbot_common::logging::{self, log_result};
use schedbot_common::Appointment;
use schedbot_config::{load_settings, Settings};
use schedbot_gcal::GoogleCalendarAdapter;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{info, warn, Level};

use crate::commands::{parse_event_time, require_adapter};
use crate::error::CliError;

/// Days covered by `list-busy` when `--to` is not given.
const DEFAULT_LIST_DAYS: u64 = 7;

#[derive(Parser)]
#[command(name = "schedbot")]
#[command(about = "Exercise the schedbot Google Calendar integration by hand")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List busy time blocks between two dates (inclusive)
    ListBusy {
        /// Start date, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date, YYYY-MM-DD (defaults to a week from today)
        #[arg(long)]
        to: Option<NaiveDate>,
    },
    /// Create a calendar event
    CreateEvent {
        #[arg(long)]
        summary: String,

        /// Start time, YYYY-MM-DDTHH:MM:SS in UTC
        #[arg(long, value_parser = parse_event_time)]
        start: DateTime<Utc>,

        /// End time, YYYY-MM-DDTHH:MM:SS in UTC
        #[arg(long, value_parser = parse_event_time)]
        end: DateTime<Utc>,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long)]
        attendee_name: Option<String>,

        #[arg(long)]
        attendee_email: Option<String>,

        #[arg(long, default_value = "")]
        location: String,

        /// IANA time zone label sent with the event
        #[arg(long, default_value = "UTC")]
        timezone: String,
    },
    /// Verify credentials, read access and write access
    CheckConnection,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_with_level(if cli.verbose { Level::DEBUG } else { Level::WARN });

    let settings = match load_settings() {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!("Failed to load config: {}", e);
            None
        }
    };
    let adapter = match &settings {
        Some(settings) => build_adapter(settings).await,
        None => None,
    };

    match run(cli.command, adapter).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// The adapter is only attempted when both the calendar id and credentials are set.
async fn build_adapter(settings: &Settings) -> Option<GoogleCalendarAdapter> {
    if !settings.has_calendar_access() {
        return None;
    }
    log_result(
        GoogleCalendarAdapter::from_settings(settings).await,
        "Google Calendar client initialized",
        "Failed to initialize Google Calendar client",
    )
    .ok()
}

async fn run(command: Commands, adapter: Option<GoogleCalendarAdapter>) -> Result<(), CliError> {
    let adapter = require_adapter(adapter)?;
    let mut out = io::stdout().lock();

    match command {
        Commands::ListBusy { from, to } => {
            let today = Utc::now().date_naive();
            let from = from.unwrap_or(today);
            let to = match to {
                Some(to) => to,
                None => today
                    .checked_add_days(Days::new(DEFAULT_LIST_DAYS))
                    .unwrap_or(today),
            };
            commands::list_busy(&adapter, from, to, &mut out).await?;
        }
        Commands::CreateEvent {
            summary,
            start,
            end,
            description,
            attendee_name,
            attendee_email,
            location,
            timezone,
        } => {
            let appointment = Appointment {
                summary,
                description,
                start,
                end,
                attendee_name,
                attendee_email,
                location,
                timezone,
            };
            commands::create_event(&adapter, appointment, &mut out).await?;
        }
        Commands::CheckConnection => {
            writeln!(out, "Calendar ID: {}", adapter.calendar_id())?;
            let report = commands::check_connection(&adapter, Utc::now(), &mut out).await?;
            info!(
                "Connection check finished: {} busy blocks, write access: {}",
                report.busy_blocks, report.can_write
            );
            if let Some(event_id) = report.leftover_event {
                warn!("Test event {} is still in the calendar", event_id);
            }
        }
    }
    Ok(())
}
