// --- File: crates/schedbot_common/src/lib.rs ---

pub mod logging; // Tracing subscriber setup
pub mod services; // Calendar abstraction and models

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use services::{Appointment, BoxFuture, CalendarAdapter, TimeBlock, GOOGLE_CALENDAR_SOURCE};
