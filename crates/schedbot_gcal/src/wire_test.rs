#[cfg(test)]
mod tests {
    use crate::wire::{
        apply_appointment, busy_blocks, error_body_message, error_message, event_from_appointment,
        event_url, events_url, format_instant, freebusy_url, Event, FreeBusyRequest,
        FreeBusyResponse,
    };
    use chrono::{TimeZone, Utc};
    use schedbot_common::{Appointment, GOOGLE_CALENDAR_SOURCE};
    use serde_json::json;

    const CALENDAR: &str = "team@group.calendar.google.com";

    fn appointment() -> Appointment {
        Appointment {
            summary: "Consultation".to_string(),
            description: String::new(),
            start: Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap(),
            attendee_name: Some("Jane Doe".to_string()),
            attendee_email: None,
            location: String::new(),
            timezone: "Europe/Zurich".to_string(),
        }
    }

    #[test]
    fn test_format_instant_uses_seconds_and_z() {
        let instant = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::milliseconds(678);
        assert_eq!(format_instant(instant), "2025-01-02T03:04:05Z");
    }

    #[test]
    fn test_freebusy_request_shape() {
        let from = Utc.with_ymd_and_hms(2025, 5, 5, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 5, 12, 0, 0, 0).unwrap();
        let body = serde_json::to_value(FreeBusyRequest::for_calendar(CALENDAR, from, to)).unwrap();

        assert_eq!(
            body,
            json!({
                "timeMin": "2025-05-05T00:00:00Z",
                "timeMax": "2025-05-12T00:00:00Z",
                "items": [{ "id": CALENDAR }]
            })
        );
    }

    #[test]
    fn test_new_event_omits_empty_fields_and_attendee_name() {
        let event = serde_json::to_value(event_from_appointment(&appointment())).unwrap();

        assert_eq!(
            event,
            json!({
                "summary": "Consultation",
                "start": { "dateTime": "2025-05-05T09:00:00Z", "timeZone": "Europe/Zurich" },
                "end": { "dateTime": "2025-05-05T10:00:00Z", "timeZone": "Europe/Zurich" }
            })
        );
    }

    #[test]
    fn test_new_event_with_attendee_and_no_timezone() {
        let mut appt = appointment();
        appt.attendee_email = Some("jane@example.com".to_string());
        appt.location = "Room 4".to_string();
        appt.timezone = String::new();

        let event = serde_json::to_value(event_from_appointment(&appt)).unwrap();

        assert_eq!(event["attendees"], json!([{ "email": "jane@example.com" }]));
        assert_eq!(event["location"], "Room 4");
        assert_eq!(event["start"], json!({ "dateTime": "2025-05-05T09:00:00Z" }));
        assert!(event.get("description").is_none());
    }

    #[test]
    fn test_apply_appointment_keeps_unmapped_fields_and_attendees() {
        let mut event: Event = serde_json::from_value(json!({
            "id": "evt1",
            "status": "confirmed",
            "summary": "Old title",
            "description": "Old notes",
            "colorId": "5",
            "reminders": { "useDefault": false },
            "attendees": [{ "email": "old@example.com", "responseStatus": "accepted" }]
        }))
        .unwrap();

        apply_appointment(&mut event, &appointment());
        let written = serde_json::to_value(&event).unwrap();

        assert_eq!(written["id"], "evt1");
        assert_eq!(written["status"], "confirmed");
        assert_eq!(written["colorId"], "5");
        assert_eq!(written["reminders"], json!({ "useDefault": false }));
        assert_eq!(written["summary"], "Consultation");
        // An empty description clears the old one.
        assert!(written.get("description").is_none());
        assert_eq!(
            written["attendees"],
            json!([{ "email": "old@example.com", "responseStatus": "accepted" }])
        );
    }

    #[test]
    fn test_apply_appointment_replaces_attendees_when_email_given() {
        let mut event: Event = serde_json::from_value(json!({
            "attendees": [{ "email": "a@example.com" }, { "email": "b@example.com" }]
        }))
        .unwrap();
        let mut appt = appointment();
        appt.attendee_email = Some("new@example.com".to_string());

        apply_appointment(&mut event, &appt);

        let written = serde_json::to_value(&event).unwrap();
        assert_eq!(written["attendees"], json!([{ "email": "new@example.com" }]));
    }

    #[test]
    fn test_busy_blocks_drop_unusable_periods() {
        let response: FreeBusyResponse = serde_json::from_value(json!({
            "calendars": {
                CALENDAR: {
                    "busy": [
                        { "start": "2025-05-05T09:00:00Z", "end": "2025-05-05T10:00:00Z" },
                        { "start": "not a time", "end": "2025-05-05T12:00:00Z" },
                        { "start": "2025-05-05T13:00:00Z" },
                        { "start": "2025-05-05T15:00:00+02:00", "end": "2025-05-05T16:30:00+02:00" }
                    ]
                },
                "other@example.com": {
                    "busy": [{ "start": "2025-05-05T09:00:00Z", "end": "2025-05-05T10:00:00Z" }]
                }
            }
        }))
        .unwrap();

        let blocks = busy_blocks(response, CALENDAR);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].start, Utc.with_ymd_and_hms(2025, 5, 5, 9, 0, 0).unwrap());
        assert_eq!(blocks[1].start, Utc.with_ymd_and_hms(2025, 5, 5, 13, 0, 0).unwrap());
        assert_eq!(blocks[1].end, Utc.with_ymd_and_hms(2025, 5, 5, 14, 30, 0).unwrap());
        assert!(blocks.iter().all(|b| b.source == GOOGLE_CALENDAR_SOURCE));
    }

    #[test]
    fn test_busy_blocks_for_missing_calendar_is_empty() {
        let response: FreeBusyResponse = serde_json::from_value(json!({
            "calendars": {
                CALENDAR: { "errors": [{ "domain": "global", "reason": "notFound" }] }
            }
        }))
        .unwrap();
        assert!(busy_blocks(response, CALENDAR).is_empty());

        let empty: FreeBusyResponse = serde_json::from_value(json!({})).unwrap();
        assert!(busy_blocks(empty, CALENDAR).is_empty());
    }

    #[test]
    fn test_urls_encode_identifiers() {
        assert_eq!(freebusy_url("http://stub/"), "http://stub/freeBusy");
        assert_eq!(
            events_url("http://stub", "a b@x.com"),
            "http://stub/calendars/a%20b%40x.com/events"
        );
        assert_eq!(
            event_url("http://stub", "primary", "evt/1"),
            "http://stub/calendars/primary/events/evt%2F1"
        );
    }

    #[test]
    fn test_error_message_prefers_google_message() {
        let body = r#"{"error":{"code":404,"message":"Not Found","errors":[]}}"#;
        assert_eq!(error_message(body), "Not Found");
        assert_eq!(error_message("  upstream exploded \n"), "upstream exploded");
        assert_eq!(error_message(""), "empty response body");
    }

    #[test]
    fn test_unreadable_error_body_is_treated_as_empty() {
        let body = Ok::<_, String>(r#"{"error":{"message":"Rate Limit Exceeded"}}"#.to_string());
        assert_eq!(error_body_message("list busy blocks", body), "Rate Limit Exceeded");

        let unreadable = Err::<String, _>("connection reset by peer");
        assert_eq!(
            error_body_message("list busy blocks", unreadable),
            "empty response body"
        );
    }
}
