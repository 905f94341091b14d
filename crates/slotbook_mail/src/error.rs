use slotbook_common::error::SchedulingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Mail provider rejected the message ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("Mail configuration error: {0}")]
    Config(String),
}

impl From<MailError> for SchedulingError {
    fn from(err: MailError) -> Self {
        match err {
            MailError::Config(msg) => SchedulingError::ConfigError(msg),
            other => SchedulingError::EmailDeliveryError(other.to_string()),
        }
    }
}
