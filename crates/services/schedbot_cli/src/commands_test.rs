#[cfg(test)]
mod tests {
    use crate::commands::{
        busy_window, check_connection, create_event, list_busy, parse_event_time,
        require_adapter, ConnectionReport,
    };
    use crate::error::CliError;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use schedbot_common::mock::{InMemoryCalendar, MockCalendarError};
    use schedbot_common::{Appointment, BoxFuture, CalendarAdapter, TimeBlock};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn appointment(summary: &str, start: DateTime<Utc>, hours: i64) -> Appointment {
        Appointment {
            summary: summary.to_string(),
            description: String::new(),
            start,
            end: start + chrono::Duration::hours(hours),
            attendee_name: None,
            attendee_email: None,
            location: String::new(),
            timezone: "UTC".to_string(),
        }
    }

    fn output(buffer: Vec<u8>) -> String {
        String::from_utf8(buffer).unwrap()
    }

    /// Reads work, writes are refused.
    struct ReadOnlyCalendar(InMemoryCalendar);

    impl CalendarAdapter for ReadOnlyCalendar {
        type Error = MockCalendarError;

        fn list_busy(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> BoxFuture<'_, Vec<TimeBlock>, Self::Error> {
            self.0.list_busy(from, to)
        }

        fn create_event(&self, _appointment: Appointment) -> BoxFuture<'_, String, Self::Error> {
            Box::pin(async { Err(MockCalendarError::Unavailable) })
        }

        fn update_event(
            &self,
            _event_id: &str,
            _appointment: Appointment,
        ) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async { Err(MockCalendarError::Unavailable) })
        }

        fn delete_event(&self, _event_id: &str) -> BoxFuture<'_, (), Self::Error> {
            Box::pin(async { Err(MockCalendarError::Unavailable) })
        }
    }

    #[test]
    fn test_require_adapter_without_client() {
        let err = require_adapter::<InMemoryCalendar>(None).unwrap_err();
        assert!(matches!(err, CliError::NotInitialized));
        assert_eq!(err.to_string(), "Google Calendar client not initialized");
    }

    #[test]
    fn test_parse_event_time_reads_utc() {
        assert_eq!(
            parse_event_time("2025-05-05T09:30:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 5, 5, 9, 30, 0).unwrap()
        );
        assert!(parse_event_time("2025-05-05 09:30").is_err());
        assert!(parse_event_time("2025-05-05T09:30:00Z").is_err());
    }

    #[test]
    fn test_busy_window_covers_whole_days() {
        let (start, end) = busy_window(date(2025, 5, 5), date(2025, 5, 5)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 5, 6, 0, 0, 0).unwrap());

        let (start, end) = busy_window(date(2025, 12, 30), date(2026, 1, 2)).unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 30, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 3, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_busy_window_rejects_reversed_range() {
        let err = busy_window(date(2025, 5, 6), date(2025, 5, 5)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_list_busy_prints_numbered_blocks() {
        let calendar = InMemoryCalendar::new();
        let day = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
        calendar.create_event(appointment("a", day, 1)).await.unwrap();
        calendar
            .create_event(appointment("b", day + chrono::Duration::hours(5), 2))
            .await
            .unwrap();
        // Outside the window
        calendar
            .create_event(appointment("c", day + chrono::Duration::days(3), 1))
            .await
            .unwrap();

        let mut out = Vec::new();
        let count = list_busy(&calendar, date(2025, 5, 5), date(2025, 5, 6), &mut out)
            .await
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            output(out),
            "Busy time blocks from 2025-05-05 to 2025-05-06:\n\
             1. 2025-05-05 09:00 - 2025-05-05 10:00 (in_memory)\n\
             2. 2025-05-05 14:00 - 2025-05-05 16:00 (in_memory)\n"
        );
    }

    #[tokio::test]
    async fn test_list_busy_empty() {
        let mut out = Vec::new();
        let count = list_busy(&InMemoryCalendar::new(), date(2025, 5, 5), date(2025, 5, 12), &mut out)
            .await
            .unwrap();

        assert_eq!(count, 0);
        assert!(output(out).ends_with("No busy blocks found.\n"));
    }

    #[tokio::test]
    async fn test_list_busy_failure_is_reported() {
        let mut out = Vec::new();
        let err = list_busy(
            &InMemoryCalendar::unavailable(),
            date(2025, 5, 5),
            date(2025, 5, 5),
            &mut out,
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "failed to list busy blocks: calendar unavailable");
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_create_event_prints_id() {
        let calendar = InMemoryCalendar::new();
        let start = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
        let mut out = Vec::new();

        let id = create_event(&calendar, appointment("Consultation", start, 1), &mut out)
            .await
            .unwrap();

        assert_eq!(id, "mock-event-1");
        assert_eq!(output(out), "Event created successfully with ID: mock-event-1\n");
        assert_eq!(calendar.get(&id).unwrap().summary, "Consultation");
    }

    #[tokio::test]
    async fn test_create_event_validates_input() {
        let calendar = InMemoryCalendar::new();
        let start = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
        let mut out = Vec::new();

        let err = create_event(&calendar, appointment("  ", start, 1), &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "summary is required");

        let err = create_event(&calendar, appointment("Backwards", start, -1), &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "end time must be after start time");

        assert!(calendar.events().is_empty());
    }

    #[tokio::test]
    async fn test_check_connection_cleans_up_test_event() {
        let calendar = InMemoryCalendar::new();
        let now = Utc.with_ymd_and_hms(2025, 5, 5, 12, 0, 0).unwrap();
        calendar
            .create_event(appointment("Existing", now - chrono::Duration::hours(3), 1))
            .await
            .unwrap();
        let mut out = Vec::new();

        let report = check_connection(&calendar, now, &mut out).await.unwrap();

        assert_eq!(
            report,
            ConnectionReport {
                busy_blocks: 1,
                can_write: true,
                leftover_event: None,
            }
        );
        assert_eq!(calendar.events().len(), 1);
        let text = output(out);
        assert!(text.contains("Test event cleaned up"));
        assert!(text.contains("Write permissions: OK"));
    }

    #[tokio::test]
    async fn test_check_connection_tolerates_refused_write() {
        let calendar = ReadOnlyCalendar(InMemoryCalendar::new());
        let mut out = Vec::new();

        let report = check_connection(&calendar, Utc::now(), &mut out)
            .await
            .unwrap();

        assert!(!report.can_write);
        assert_eq!(report.leftover_event, None);
        let text = output(out);
        assert!(text.contains("Warning: event creation failed: calendar unavailable"));
        assert!(text.contains("Write permissions: missing"));
    }

    #[tokio::test]
    async fn test_check_connection_requires_read_access() {
        let mut out = Vec::new();
        let err = check_connection(&InMemoryCalendar::unavailable(), Utc::now(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, CliError::Calendar { .. }));
    }

    #[tokio::test]
    async fn test_calendar_error_has_no_error_prefix() {
        let calendar = ReadOnlyCalendar(InMemoryCalendar::new());
        let start = Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap();
        let mut out = Vec::new();

        let err = create_event(&calendar, appointment("Consultation", start, 1), &mut out)
            .await
            .unwrap_err();

        // main prints "Error: " in front of this.
        let message = err.to_string();
        assert_eq!(message, "failed to create event: calendar unavailable");
        assert!(!message.starts_with("Error"));
    }
}
