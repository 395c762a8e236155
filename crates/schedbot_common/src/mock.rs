//! In-memory calendar for tests.
//!
//! Implements [`CalendarAdapter`] without any network access so callers of the
//! trait (CLI commands, handlers) can be exercised in isolation.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

use crate::services::{Appointment, BoxFuture, CalendarAdapter, TimeBlock};

/// Source tag put on blocks produced by [`InMemoryCalendar`].
pub const IN_MEMORY_SOURCE: &str = "in_memory";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MockCalendarError {
    #[error("event not found: {0}")]
    NotFound(String),
    #[error("calendar unavailable")]
    Unavailable,
}

/// Mock calendar holding events in a vector.
#[derive(Default, Debug)]
pub struct InMemoryCalendar {
    events: Mutex<Vec<(String, Appointment)>>,
    next_id: AtomicUsize,
    unavailable: bool,
}

impl InMemoryCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    /// A calendar whose every operation fails with [`MockCalendarError::Unavailable`].
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Snapshot of stored events.
    pub fn events(&self) -> Vec<(String, Appointment)> {
        self.lock().clone()
    }

    pub fn get(&self, event_id: &str) -> Option<Appointment> {
        self.lock()
            .iter()
            .find(|(id, _)| id == event_id)
            .map(|(_, appointment)| appointment.clone())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, Appointment)>> {
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), MockCalendarError> {
        if self.unavailable {
            Err(MockCalendarError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn busy_between(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<TimeBlock> {
        self.lock()
            .iter()
            .filter(|(_, appt)| appt.start < to && appt.end > from)
            .map(|(_, appt)| TimeBlock::new(appt.start, appt.end, IN_MEMORY_SOURCE))
            .collect()
    }
}

impl CalendarAdapter for InMemoryCalendar {
    type Error = MockCalendarError;

    fn list_busy(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<TimeBlock>, Self::Error> {
        Box::pin(async move {
            self.check_available()?;
            Ok(self.busy_between(from, to))
        })
    }

    fn create_event(&self, appointment: Appointment) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            self.check_available()?;
            let id = format!("mock-event-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            self.lock().push((id.clone(), appointment));
            Ok(id)
        })
    }

    fn update_event(
        &self,
        event_id: &str,
        appointment: Appointment,
    ) -> BoxFuture<'_, (), Self::Error> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.check_available()?;
            let mut events = self.lock();
            let slot = events
                .iter_mut()
                .find(|(id, _)| *id == event_id)
                .ok_or_else(|| MockCalendarError::NotFound(event_id.clone()))?;
            slot.1 = appointment;
            Ok(())
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, (), Self::Error> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.check_available()?;
            let mut events = self.lock();
            let before = events.len();
            events.retain(|(id, _)| *id != event_id);
            if events.len() == before {
                return Err(MockCalendarError::NotFound(event_id));
            }
            Ok(())
        })
    }
}
