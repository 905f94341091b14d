// --- File: crates/slotbook_gcal/src/service.rs ---
//! Google Calendar implementation of [`CalendarService`].
//!
//! Every call builds a hub around the caller's access token; nothing is
//! cached between requests.

use chrono::{DateTime, Utc};
use google_calendar3::api::{
    ConferenceData, ConferenceSolutionKey, CreateConferenceRequest, Event, EventAttendee,
    EventDateTime, EventOrganizer, FreeBusyRequest, FreeBusyRequestItem,
};
use slotbook_common::error::SchedulingError;
use slotbook_common::models::{BusyInterval, CreatedEvent, MeetingRequest};
use slotbook_common::services::{BoxFuture, CalendarService};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::create_calendar_hub;

/// Conference solution requested for new events.
const MEET_SOLUTION: &str = "hangoutsMeet";

/// Errors that can occur when interacting with Google Calendar.
#[derive(Error, Debug)]
pub enum GcalServiceError {
    #[error("Google API Error: {0}")]
    ApiError(#[from] google_calendar3::Error),
    #[error("Failed to set up HTTPS connector: {0}")]
    ConnectorError(String),
    #[error("Unexpected calendar response: {0}")]
    ResponseError(String),
}

impl From<GcalServiceError> for SchedulingError {
    fn from(err: GcalServiceError) -> Self {
        SchedulingError::UpstreamError(err.to_string())
    }
}

/// True when the API says the event is already gone (404 or 410).
fn is_gone(err: &google_calendar3::Error) -> bool {
    match err {
        google_calendar3::Error::Failure(response) => {
            matches!(response.status().as_u16(), 404 | 410)
        }
        google_calendar3::Error::BadRequest(body) => {
            matches!(body["error"]["code"].as_u64(), Some(404) | Some(410))
        }
        _ => false,
    }
}

/// Google Calendar service implementation.
#[derive(Debug, Clone, Default)]
pub struct GoogleCalendarService {
    base_url: Option<String>,
}

impl GoogleCalendarService {
    /// Service talking to the public Calendar API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Service talking to a different API root, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url: Some(base_url),
        }
    }
}

/// Builds the event resource for a meeting, with a Meet link create request.
pub fn build_event(meeting: &MeetingRequest) -> Event {
    let event_time = |at: DateTime<Utc>| EventDateTime {
        date_time: Some(at),
        time_zone: meeting.time_zone.clone(),
        ..Default::default()
    };

    Event {
        summary: Some(meeting.summary.clone()),
        description: Some(meeting.description.clone()),
        start: Some(event_time(meeting.start)),
        end: Some(event_time(meeting.end)),
        attendees: Some(vec![EventAttendee {
            email: Some(meeting.guest_email.clone()),
            display_name: Some(meeting.guest_name.clone()),
            ..Default::default()
        }]),
        organizer: Some(EventOrganizer {
            email: Some(meeting.organizer.email.clone()),
            display_name: Some(meeting.organizer.name.clone()),
            ..Default::default()
        }),
        conference_data: Some(ConferenceData {
            create_request: Some(CreateConferenceRequest {
                request_id: Some(meeting.conference_request_id.clone()),
                conference_solution_key: Some(ConferenceSolutionKey {
                    type_: Some(MEET_SOLUTION.to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

impl CalendarService for GoogleCalendarService {
    type Error = GcalServiceError;

    /// Busy periods of `calendar_id` between `start_time` and `end_time`,
    /// sorted by start. Periods missing either bound are skipped.
    fn get_busy_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let access_token = access_token.to_string();
        let calendar_id = calendar_id.to_string();

        Box::pin(async move {
            let hub = create_calendar_hub(&access_token, self.base_url.as_deref())?;
            let req = FreeBusyRequest {
                time_min: Some(start_time),
                time_max: Some(end_time),
                items: Some(vec![FreeBusyRequestItem {
                    id: Some(calendar_id.clone()),
                    ..Default::default()
                }]),
                ..Default::default()
            };

            let (_response, freebusy) = hub.freebusy().query(req).doit().await?;

            let mut busy = Vec::new();
            if let Some(cal_info) = freebusy.calendars.as_ref().and_then(|c| c.get(&calendar_id)) {
                if let Some(errors) = cal_info.errors.as_ref().filter(|e| !e.is_empty()) {
                    let reasons: Vec<String> = errors
                        .iter()
                        .filter_map(|e| e.reason.clone())
                        .collect();
                    return Err(GcalServiceError::ResponseError(format!(
                        "free/busy lookup failed for {}: {}",
                        calendar_id,
                        reasons.join(", ")
                    )));
                }
                for period in cal_info.busy.iter().flatten() {
                    match (period.start, period.end) {
                        (Some(start), Some(end)) => busy.push(BusyInterval { start, end }),
                        _ => warn!("Skipping busy period with missing start/end: {:?}", period),
                    }
                }
            }
            busy.sort_by_key(|b| b.start);
            debug!("{} busy periods for {}", busy.len(), calendar_id);
            Ok(busy)
        })
    }

    /// Inserts the meeting with `conferenceDataVersion=1` and `sendUpdates=all`
    /// so Google generates the Meet link and notifies the attendee.
    fn create_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        meeting: MeetingRequest,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let access_token = access_token.to_string();
        let calendar_id = calendar_id.to_string();

        Box::pin(async move {
            let hub = create_calendar_hub(&access_token, self.base_url.as_deref())?;
            let event = build_event(&meeting);

            let (_response, created) = hub
                .events()
                .insert(event, &calendar_id)
                .conference_data_version(1)
                .send_updates("all")
                .doit()
                .await?;

            let raw = serde_json::to_value(&created)
                .map_err(|e| GcalServiceError::ResponseError(e.to_string()))?;
            info!(event_id = ?created.id, "Created calendar event");

            Ok(CreatedEvent {
                id: created.id,
                hangout_link: created.hangout_link,
                html_link: created.html_link,
                status: created.status,
                raw,
            })
        })
    }

    /// Deletes the event. An event that no longer exists counts as deleted.
    fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error> {
        let access_token = access_token.to_string();
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();

        Box::pin(async move {
            let hub = create_calendar_hub(&access_token, self.base_url.as_deref())?;
            match hub
                .events()
                .delete(&calendar_id, &event_id)
                .send_updates("all")
                .doit()
                .await
            {
                Ok(_) => {
                    info!(%event_id, "Deleted calendar event");
                    Ok(())
                }
                Err(e) if is_gone(&e) => {
                    info!(%event_id, "Calendar event already gone");
                    Ok(())
                }
                Err(e) => Err(GcalServiceError::ApiError(e)),
            }
        })
    }
}
