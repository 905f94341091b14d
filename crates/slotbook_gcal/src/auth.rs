// File: crates/slotbook_gcal/src/auth.rs
use google_calendar3::{
    hyper_rustls::{self, HttpsConnectorBuilder},
    hyper_util::client::legacy::connect::HttpConnector,
    hyper_util::client::legacy::Client,
    CalendarHub,
};

use crate::service::GcalServiceError;

// Type aliases for clarity
type Connector = hyper_rustls::HttpsConnector<HttpConnector>;

pub type HubType = CalendarHub<Connector>;

/// Builds a hub that authenticates every call with the visitor's OAuth
/// access token. The token is used verbatim as a bearer token.
///
/// `base_url` overrides the Calendar API root (it must end with `/`).
pub fn create_calendar_hub(
    access_token: &str,
    base_url: Option<&str>,
) -> Result<HubType, GcalServiceError> {
    let https = HttpsConnectorBuilder::new()
        .with_native_roots()
        .map_err(|e| GcalServiceError::ConnectorError(e.to_string()))?
        .https_or_http()
        .enable_http1()
        .build();

    let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(https);

    let mut hub = CalendarHub::new(client, access_token.to_string());
    if let Some(base_url) = base_url {
        hub.base_url(base_url.to_string());
    }

    Ok(hub)
}
