// --- File: crates/slotbook_booking/src/logic.rs ---
//! Availability fetch and the three-step booking submit.
//!
//! Booking is not atomic across the calendar and the store. The calendar
//! event is created first, the row is written second, and a failed write
//! deletes the event again. The confirmation email is best effort.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use slotbook_common::error::{
    config_error, invalid_request, persistence_error, storage_error, upstream_error,
    SchedulingError,
};
use slotbook_common::log_error;
use slotbook_common::models::{
    AvailabilityResponse, Booking, BookingConfirmation, BookingDetails, MeetingRequest,
    NewBooking, OrganizerProfile, SlotsResponse,
};
use slotbook_gcal::generate_slots;
use slotbook_mail::ConfirmationContext;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::state::BookingState;

pub const BOOKING_CONFIRMED_MESSAGE: &str = "Event created and saved";
pub const DEFAULT_DESCRIPTION: &str = "Llamada agendada desde el sitio web.";
const MISSING_EVENT_FIELDS: &str =
    "The calendar did not return an event id and a video conference link";

/// Body of `POST /availability`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AvailabilityRequest {
    pub access_token: Option<String>,
}

/// Body of `POST /book`. Every field is optional on the wire so a missing
/// one is reported by [`BookRequest::validate`] instead of the extractor.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BookRequest {
    pub access_token: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = DateTime))]
    pub selected_slot: Option<DateTime<Utc>>,
    pub details: Option<BookingDetails>,
    pub profile: Option<OrganizerProfile>,
    /// Minutes.
    pub duration: Option<i64>,
}

/// Body of `POST /slots`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SlotsRequest {
    pub access_token: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, format = Date))]
    pub date: Option<NaiveDate>,
    /// IANA zone the day is interpreted in. Defaults to the configured zone.
    pub time_zone: Option<String>,
}

/// A booking request with every required input present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub access_token: String,
    pub selected_slot: DateTime<Utc>,
    pub details: BookingDetails,
    pub profile: OrganizerProfile,
    pub duration: i64,
    /// `selected_slot + duration`, checked to be representable.
    pub end: DateTime<Utc>,
}

impl BookRequest {
    /// Checks the five inputs and names every one that is missing.
    pub fn validate(self) -> Result<ValidBooking, SchedulingError> {
        let access_token = non_blank(self.access_token);
        let duration = self.duration.filter(|minutes| *minutes > 0);
        let end = match (self.selected_slot, duration) {
            (Some(start), Some(minutes)) => meeting_end(start, minutes),
            _ => None,
        };

        let mut missing = Vec::new();
        if access_token.is_none() {
            missing.push("accessToken");
        }
        if self.selected_slot.is_none() {
            missing.push("selectedSlot");
        }
        match &self.details {
            None => missing.push("details"),
            Some(details) => {
                if details.name.trim().is_empty() {
                    missing.push("details.name");
                }
                if details.email.trim().is_empty() {
                    missing.push("details.email");
                }
            }
        }
        if self.profile.is_none() {
            missing.push("profile");
        }
        if duration.is_none() || (self.selected_slot.is_some() && end.is_none()) {
            missing.push("duration");
        }

        match (
            access_token,
            self.selected_slot,
            self.details,
            self.profile,
            duration,
            end,
        ) {
            (
                Some(access_token),
                Some(selected_slot),
                Some(details),
                Some(profile),
                Some(duration),
                Some(end),
            ) if missing.is_empty() =>
            {
                Ok(ValidBooking {
                    access_token,
                    selected_slot,
                    details,
                    profile,
                    duration,
                    end,
                })
            }
            _ => Err(invalid_request(format!(
                "Missing or invalid booking data: {}",
                missing.join(", ")
            ))),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn require_token(access_token: Option<&str>) -> Result<&str, SchedulingError> {
    access_token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| invalid_request("Access token is required"))
}

/// Reads the event type and weekly template, then the busy intervals of
/// `[start, end]`. Nothing is written.
async fn load_schedule(
    state: &BookingState,
    access_token: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<AvailabilityResponse, SchedulingError> {
    let event_type = state
        .store
        .get_event_type()
        .await
        .map_err(storage_error)?
        .ok_or_else(|| storage_error("No event type is configured"))?;
    let availability = state
        .store
        .list_availabilities()
        .await
        .map_err(storage_error)?;

    let busy = state
        .calendar
        .get_busy_times(access_token, state.config.calendar_id(), start, end)
        .await
        .map_err(upstream_error)?;

    debug!(
        busy = busy.len(),
        rows = availability.len(),
        "Loaded schedule for {} .. {}",
        start,
        end
    );

    Ok(AvailabilityResponse {
        busy,
        event_type,
        availability,
    })
}

/// Scheduling configuration plus the calendar's busy intervals from now
/// until the end of the configured look-ahead window.
pub async fn fetch_availability(
    state: &BookingState,
    access_token: Option<&str>,
) -> Result<AvailabilityResponse, SchedulingError> {
    let access_token = require_token(access_token)?;
    let now = Utc::now();
    let window_days = state.config.availability_window_days();
    let end = Duration::try_days(window_days)
        .and_then(|window| now.checked_add_signed(window))
        .ok_or_else(|| {
            config_error(format!("availability_window_days {} is out of range", window_days))
        })?;
    load_schedule(state, access_token, now, end).await
}

/// Runs the slot generator for one day over freshly fetched availability.
pub async fn compute_slots(
    state: &BookingState,
    request: SlotsRequest,
) -> Result<SlotsResponse, SchedulingError> {
    let access_token = require_token(request.access_token.as_deref())?;
    let date = request
        .date
        .ok_or_else(|| invalid_request("date is required (YYYY-MM-DD)"))?;
    let tz: Tz = match request.time_zone.as_deref() {
        Some(name) => name
            .parse()
            .map_err(|_| invalid_request(format!("Unknown time zone: {}", name)))?,
        None => state.time_zone,
    };

    let midnight = date.and_time(NaiveTime::MIN);
    let day_start = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc());
    let day_end = day_start
        .checked_add_signed(Duration::days(1))
        .ok_or_else(|| invalid_request(format!("Date out of range: {}", date)))?;
    let schedule = load_schedule(state, access_token, day_start, day_end).await?;

    let slots = generate_slots(
        date,
        &schedule.availability,
        &schedule.event_type,
        &schedule.busy,
        &tz,
    );

    Ok(SlotsResponse {
        date,
        time_zone: tz.name().to_string(),
        slots: slots.into_iter().map(|slot| slot.fixed_offset()).collect(),
    })
}

/// End of a meeting of `minutes` starting at `start`, `None` when it
/// falls outside the representable range.
fn meeting_end(start: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    Duration::try_minutes(minutes).and_then(|length| start.checked_add_signed(length))
}

/// The calendar event inserted for `booking`.
pub fn meeting_request(booking: &ValidBooking, time_zone: Tz) -> MeetingRequest {
    let description = booking
        .details
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|notes| !notes.is_empty())
        .unwrap_or(DEFAULT_DESCRIPTION)
        .to_string();

    MeetingRequest {
        summary: format!("Llamada con {}", booking.details.name.trim()),
        description,
        start: booking.selected_slot,
        end: booking.end,
        time_zone: Some(time_zone.name().to_string()),
        guest_name: booking.details.name.trim().to_string(),
        guest_email: booking.details.email.trim().to_string(),
        organizer: booking.profile.clone(),
        conference_request_id: format!("meet-{}", Uuid::new_v4()),
    }
}

pub fn cancellation_link(public_base_url: &str, cancellation_id: &str) -> String {
    format!("{}/cancel/{}", public_base_url, cancellation_id)
}

/// Creates the calendar event, persists the booking and sends the
/// confirmation email, in that order.
///
/// A failed insert deletes the event again before the error is returned.
/// Email failures are logged and never fail the booking.
pub async fn submit_booking(
    state: &BookingState,
    booking: ValidBooking,
) -> Result<BookingConfirmation, SchedulingError> {
    let calendar_id = state.config.calendar_id();
    let meeting = meeting_request(&booking, state.time_zone);
    info!(
        start = %meeting.start,
        end = %meeting.end,
        guest = %meeting.guest_email,
        "Creating calendar event"
    );

    let created = state
        .calendar
        .create_event(&booking.access_token, calendar_id, meeting)
        .await
        .map_err(upstream_error)?;

    let (event_id, meet_link) = match (&created.id, &created.hangout_link) {
        (Some(id), Some(link)) => {
            info!(
                event_id = %id,
                status = created.status.as_deref().unwrap_or("unknown"),
                html_link = created.html_link.as_deref().unwrap_or(""),
                "Calendar event created"
            );
            (id.clone(), link.clone())
        }
        _ => {
            warn!(event_id = ?created.id, "Calendar response is incomplete");
            return Err(upstream_error(MISSING_EVENT_FIELDS));
        }
    };

    let new_booking = NewBooking {
        guest_name: booking.details.name.trim().to_string(),
        guest_email: booking.details.email.trim().to_string(),
        start_time: booking.selected_slot,
        google_calendar_event_id: event_id.clone(),
    };

    let stored = match state.store.insert_booking(new_booking).await {
        Ok(stored) => stored,
        Err(e) => {
            error!(event_id = %event_id, "Saving the booking failed: {}", e);
            match state
                .calendar
                .delete_event(&booking.access_token, calendar_id, &event_id)
                .await
            {
                Ok(()) => info!(event_id = %event_id, "Deleted the calendar event of the unsaved booking"),
                Err(delete_err) => error!(
                    event_id = %event_id,
                    "Compensating delete failed, the calendar event is orphaned: {}",
                    delete_err
                ),
            }
            return Err(persistence_error(e));
        }
    };
    info!(booking_id = stored.id, event_id = %event_id, "Booking saved");

    send_confirmation(state, &booking, &stored, &meet_link).await;

    Ok(BookingConfirmation {
        message: BOOKING_CONFIRMED_MESSAGE.to_string(),
        data: created.raw,
    })
}

async fn send_confirmation(
    state: &BookingState,
    booking: &ValidBooking,
    stored: &Booking,
    meet_link: &str,
) {
    let context = ConfirmationContext {
        guest_name: stored.guest_name.clone(),
        organizer_name: booking.profile.name.clone(),
        start: stored.start_time,
        meet_link: meet_link.to_string(),
        cancellation_link: cancellation_link(
            state.config.public_base_url(),
            &stored.cancellation_id,
        ),
    };

    let email = match state.renderer.render(&context) {
        Ok(email) => email,
        Err(e) => {
            log_error(SchedulingError::from(e), "Confirmation email not sent");
            return;
        }
    };

    match state
        .notifier
        .send_email(&stored.guest_email, &email.subject, &email.html, true)
        .await
    {
        Ok(result) => info!(
            message_id = %result.id,
            status = %result.status,
            "Confirmation email sent to {}",
            stored.guest_email
        ),
        Err(e) => log_error(
            SchedulingError::EmailDeliveryError(e.to_string()),
            "Booking kept without confirmation email",
        ),
    }
}
