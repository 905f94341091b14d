// --- File: crates/slotbook_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error taxonomy shared by the scheduling endpoints.
///
/// Each crate keeps its own error enum and converts into this one where it
/// crosses a handler boundary. The `Display` text is what ends up in the
/// `details` field of the error envelope.
#[derive(Error, Debug)]
pub enum SchedulingError {
    /// Missing or malformed input, user-correctable.
    #[error("{0}")]
    InvalidRequest(String),

    /// The external calendar rejected or failed the call. Never retried.
    #[error("{0}")]
    UpstreamError(String),

    /// Reading scheduling configuration from storage failed.
    #[error("{0}")]
    StorageError(String),

    /// Writing the booking failed after the calendar event was created.
    #[error("Failed to save booking: {0}")]
    PersistenceError(String),

    /// Confirmation email could not be delivered. Logged, never surfaced.
    #[error("Failed to send confirmation email: {0}")]
    EmailDeliveryError(String),

    /// Missing or invalid server configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SchedulingError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulingError::InvalidRequest(_) => 400,
            SchedulingError::UpstreamError(_) => 500,
            SchedulingError::StorageError(_) => 500,
            SchedulingError::PersistenceError(_) => 500,
            SchedulingError::EmailDeliveryError(_) => 500,
            SchedulingError::ConfigError(_) => 500,
        }
    }
}

// Shorthand constructors
pub fn invalid_request<T: fmt::Display>(message: T) -> SchedulingError {
    SchedulingError::InvalidRequest(message.to_string())
}

pub fn upstream_error<T: fmt::Display>(message: T) -> SchedulingError {
    SchedulingError::UpstreamError(message.to_string())
}

pub fn storage_error<T: fmt::Display>(message: T) -> SchedulingError {
    SchedulingError::StorageError(message.to_string())
}

pub fn persistence_error<T: fmt::Display>(message: T) -> SchedulingError {
    SchedulingError::PersistenceError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> SchedulingError {
    SchedulingError::ConfigError(message.to_string())
}
