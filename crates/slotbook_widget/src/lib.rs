// --- File: crates/slotbook_widget/src/lib.rs ---
//! Everything the booking widget needs short of drawing pixels: the
//! session state machine, view models for each screen and a typed client
//! for the backend endpoints.

pub mod client;
pub mod error;
pub mod session;
#[cfg(test)]
mod session_test;
pub mod view;

pub use client::{BookingSubmission, SchedulerClient};
pub use error::{ClientError, TransitionError};
pub use session::{Schedule, Scheduler, SchedulerState, Session};
