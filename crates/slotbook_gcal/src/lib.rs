// --- File: crates/slotbook_gcal/src/lib.rs ---
pub mod auth;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod service;

pub use logic::{generate_slots, generate_slots_with, week_days, SlotBoundary};
pub use service::{GcalServiceError, GoogleCalendarService};
