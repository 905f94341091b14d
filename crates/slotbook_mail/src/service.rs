// --- File: crates/slotbook_mail/src/service.rs ---
//! Email delivery through the Resend HTTP API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use slotbook_common::http::client::HTTP_CLIENT;
use slotbook_common::models::NotificationResult;
use slotbook_common::services::{BoxFuture, NotificationService};
use slotbook_config::{MailConfig, SECRET_MARKER};
use tracing::{debug, error, info};

use crate::error::MailError;

pub const DEFAULT_API_URL: &str = "https://api.resend.com";

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Sends mail through Resend (`POST {api_url}/emails`).
#[derive(Debug, Clone)]
pub struct ResendNotificationService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl ResendNotificationService {
    pub fn new(client: Client, api_url: &str, api_key: &str, from: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }

    /// Builds the service from the `[mail]` config section on the shared client.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        if config.api_key.is_empty() || config.api_key == SECRET_MARKER {
            return Err(MailError::Config(
                "mail.api_key is not set (export MAIL_API_KEY)".to_string(),
            ));
        }
        Ok(Self::new(
            HTTP_CLIENT.clone(),
            config.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
            &config.api_key,
            &config.from,
        ))
    }

    async fn send(
        &self,
        to: String,
        subject: String,
        body: String,
        is_html: bool,
    ) -> Result<NotificationResult, MailError> {
        let request = SendEmailRequest {
            from: &self.from,
            to: [to.as_str()],
            subject: &subject,
            html: is_html.then_some(body.as_str()),
            text: (!is_html).then_some(body.as_str()),
        };

        debug!(%to, "Sending email through Resend");
        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Resend rejected email: {}", message);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response.json().await?;
        info!(id = %sent.id, "Email accepted by Resend");
        Ok(NotificationResult {
            id: sent.id,
            status: "sent".to_string(),
        })
    }
}

impl NotificationService for ResendNotificationService {
    type Error = MailError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        Box::pin(self.send(to.to_string(), subject.to_string(), body.to_string(), is_html))
    }
}

/// Used when `use_mail` is off: the message is logged and dropped.
#[derive(Debug, Clone, Default)]
pub struct LogNotificationService;

impl NotificationService for LogNotificationService {
    type Error = MailError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        _body: &str,
        _is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        info!(%to, %subject, "Mail disabled, not sending");
        Box::pin(async move {
            Ok(NotificationResult {
                id: String::new(),
                status: "skipped".to_string(),
            })
        })
    }
}
