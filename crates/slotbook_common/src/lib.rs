// --- File: crates/slotbook_common/src/lib.rs ---

pub mod error; // Error taxonomy shared by every endpoint
pub mod http; // Axum response/extraction helpers and the shared reqwest client
pub mod logging; // Logging utilities
pub mod models; // Wire and storage data structures
pub mod services; // Service abstractions for the external collaborators

pub use error::{HttpStatusCode, SchedulingError};

pub use http::{accept_json, client::HTTP_CLIENT, ApiError};

pub use logging::{init, log_error, log_result};

// This crate holds everything the scheduling crates agree on: the data model,
// the error taxonomy, and the traits the handlers are written against.
