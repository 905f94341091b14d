// --- File: crates/slotbook_widget/src/client.rs ---
//! Typed client for the scheduling endpoints and the Google userinfo call.

use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use slotbook_common::http::client::HTTP_CLIENT;
use slotbook_common::http::ErrorBody;
use slotbook_common::models::{
    AvailabilityResponse, BookingConfirmation, BookingDetails, OrganizerProfile, SlotsResponse,
};
use tracing::{debug, warn};

use crate::error::ClientError;

pub const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

/// Body of `POST /api/book`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub access_token: String,
    pub selected_slot: DateTime<Utc>,
    pub details: BookingDetails,
    pub profile: OrganizerProfile,
    pub duration: i64,
}

#[derive(Debug, Clone)]
pub struct SchedulerClient {
    client: Client,
    base_url: String,
    userinfo_url: String,
}

impl SchedulerClient {
    /// Client for the backend at `base_url` on the shared HTTP client.
    pub fn new(base_url: &str) -> Self {
        Self::with_client(HTTP_CLIENT.clone(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
        }
    }

    pub fn with_userinfo_url(mut self, userinfo_url: &str) -> Self {
        self.userinfo_url = userinfo_url.to_string();
        self
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    pub async fn fetch_availability(
        &self,
        access_token: &str,
    ) -> Result<AvailabilityResponse, ClientError> {
        let response = self
            .client
            .post(self.api_url("availability"))
            .json(&json!({ "accessToken": access_token }))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn fetch_slots(
        &self,
        access_token: &str,
        date: NaiveDate,
        time_zone: Option<&str>,
    ) -> Result<SlotsResponse, ClientError> {
        let mut body = json!({
            "accessToken": access_token,
            "date": date.format("%Y-%m-%d").to_string(),
        });
        if let Some(time_zone) = time_zone {
            body["timeZone"] = json!(time_zone);
        }
        let response = self
            .client
            .post(self.api_url("slots"))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn book(
        &self,
        submission: &BookingSubmission,
    ) -> Result<BookingConfirmation, ClientError> {
        debug!(slot = %submission.selected_slot, "Submitting booking");
        let response = self
            .client
            .post(self.api_url("book"))
            .json(submission)
            .send()
            .await?;
        decode(response).await
    }

    /// The signed-in user's name and email, used as the event organizer.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<OrganizerProfile, ClientError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    warn!(status = status.as_u16(), "Request failed: {}", body);
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(envelope) => Err(ClientError::Api {
            status: status.as_u16(),
            error: envelope.error,
            details: envelope.details,
        }),
        Err(_) => Err(ClientError::UnexpectedResponse {
            status: status.as_u16(),
            body,
        }),
    }
}
