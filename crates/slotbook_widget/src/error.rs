use chrono::NaiveDate;
use slotbook_common::error::SchedulingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend answered with its `{ error, details }` envelope.
    #[error("{error}: {details}")]
    Api {
        status: u16,
        error: String,
        details: String,
    },
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },
}

impl ClientError {
    /// The text shown to the visitor when a call fails.
    pub fn details(&self) -> String {
        match self {
            ClientError::Api { details, .. } => details.clone(),
            other => other.to_string(),
        }
    }
}

impl From<ClientError> for SchedulingError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status: 400,
                details,
                ..
            } => SchedulingError::InvalidRequest(details),
            other => SchedulingError::UpstreamError(other.to_string()),
        }
    }
}

/// A state machine action that isn't allowed from the current state.
/// The state is left untouched whenever one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("{0} is not one of the offered days")]
    DayNotOffered(NaiveDate),
    #[error("{0} is not an available slot")]
    SlotUnavailable(String),
    #[error("the organizer profile has not been loaded yet")]
    MissingProfile,
    #[error("booking failed: {0}")]
    SubmissionFailed(String),
}
