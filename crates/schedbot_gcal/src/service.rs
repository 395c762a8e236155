// --- File: crates/schedbot_gcal/src/service.rs ---
//! Google Calendar adapter.
//!
//! Implements [`CalendarAdapter`] against Calendar API v3 for one configured
//! calendar, authenticating every request with a bearer token from a
//! [`TokenProvider`].

use chrono::{DateTime, Utc};
use reqwest::{RequestBuilder, Response};
use schedbot_common::services::{Appointment, BoxFuture, CalendarAdapter, TimeBlock};
use schedbot_config::Settings;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::auth::{ServiceAccountTokens, TokenProvider};
use crate::error::GcalError;
use crate::wire::{
    apply_appointment, busy_blocks, error_body_message, event_from_appointment, event_url, events_url,
    freebusy_url, Event, FreeBusyRequest, FreeBusyResponse,
};

/// Public Calendar API v3 endpoint.
pub const GOOGLE_CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

const QUERY_FREEBUSY: &str = "query free/busy";
const CREATE_EVENT: &str = "create calendar event";
const GET_EVENT: &str = "get existing event";
const UPDATE_EVENT: &str = "update calendar event";
const DELETE_EVENT: &str = "delete calendar event";

/// Google Calendar implementation of [`CalendarAdapter`].
pub struct GoogleCalendarAdapter {
    http: reqwest::Client,
    tokens: Box<dyn TokenProvider>,
    base_url: String,
    calendar_id: String,
}

impl GoogleCalendarAdapter {
    /// Build an adapter from resolved settings.
    ///
    /// Resolves the credential field, checks that it is a service-account key
    /// and sets up the token session. The calendar id is taken as is.
    ///
    /// # Errors
    ///
    /// * [`GcalError::Credentials`] if the credential field is empty or names
    ///   a file that cannot be read
    /// * [`GcalError::Session`] if the bytes are not a usable service-account key
    /// * [`GcalError::NotServiceAccount`] if the key has another `type`
    pub async fn from_settings(settings: &Settings) -> Result<Self, GcalError> {
        let key_bytes = settings.google_credentials()?;
        let tokens = ServiceAccountTokens::from_key_bytes(&key_bytes).await?;
        info!(
            "Google Calendar adapter ready for calendar {}",
            settings.gcal_calendar_id
        );
        Ok(Self::with_token_provider(
            GOOGLE_CALENDAR_API_BASE,
            settings.gcal_calendar_id.clone(),
            Box::new(tokens),
        ))
    }

    /// Build an adapter against an arbitrary API base, e.g. a local stub.
    pub fn with_token_provider(
        base_url: impl Into<String>,
        calendar_id: impl Into<String>,
        tokens: Box<dyn TokenProvider>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            tokens,
            base_url: base_url.into(),
            calendar_id: calendar_id.into(),
        }
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, GcalError> {
        let token = self.tokens.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| GcalError::Transport { operation, source })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        Err(GcalError::Api {
            operation,
            status: status.as_u16(),
            message: error_body_message(operation, response.text().await),
        })
    }

    async fn read_json<T: DeserializeOwned>(
        operation: &'static str,
        response: Response,
    ) -> Result<T, GcalError> {
        let body = response
            .text()
            .await
            .map_err(|source| GcalError::Transport { operation, source })?;
        serde_json::from_str(&body).map_err(|e| GcalError::MalformedResponse {
            operation,
            detail: e.to_string(),
        })
    }
}

impl CalendarAdapter for GoogleCalendarAdapter {
    type Error = GcalError;

    fn list_busy(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<TimeBlock>, Self::Error> {
        Box::pin(async move {
            let body = FreeBusyRequest::for_calendar(&self.calendar_id, from, to);
            let request = self.http.post(freebusy_url(&self.base_url)).json(&body);
            let response = self.send(QUERY_FREEBUSY, request).await?;
            let freebusy: FreeBusyResponse = Self::read_json(QUERY_FREEBUSY, response).await?;

            let blocks = busy_blocks(freebusy, &self.calendar_id);
            debug!("Found {} busy blocks between {} and {}", blocks.len(), from, to);
            Ok(blocks)
        })
    }

    fn create_event(&self, appointment: Appointment) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            let event = event_from_appointment(&appointment);
            let request = self
                .http
                .post(events_url(&self.base_url, &self.calendar_id))
                .json(&event);
            let response = self.send(CREATE_EVENT, request).await?;
            let created: Event = Self::read_json(CREATE_EVENT, response).await?;

            let id = created
                .id
                .filter(|id| !id.is_empty())
                .ok_or_else(|| GcalError::MalformedResponse {
                    operation: CREATE_EVENT,
                    detail: "response did not include an event id".to_string(),
                })?;
            info!("Created calendar event {}", id);
            Ok(id)
        })
    }

    // Fetch, overwrite the mapped fields, then write the whole event back.
    fn update_event(
        &self,
        event_id: &str,
        appointment: Appointment,
    ) -> BoxFuture<'_, (), Self::Error> {
        let url = event_url(&self.base_url, &self.calendar_id, event_id);
        let event_id = event_id.to_string();
        Box::pin(async move {
            let response = self.send(GET_EVENT, self.http.get(&url)).await?;
            let mut event: Event = Self::read_json(GET_EVENT, response).await?;

            apply_appointment(&mut event, &appointment);

            self.send(UPDATE_EVENT, self.http.put(&url).json(&event))
                .await?;
            info!("Updated calendar event {}", event_id);
            Ok(())
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let url = event_url(&self.base_url, &self.calendar_id, event_id);
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.send(DELETE_EVENT, self.http.delete(&url)).await?;
            info!("Deleted calendar event {}", event_id);
            Ok(())
        })
    }
}
