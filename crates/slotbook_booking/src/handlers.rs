// --- File: crates/slotbook_booking/src/handlers.rs ---
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use slotbook_common::http::accept_json;
use slotbook_common::log_error;
use slotbook_common::models::{AvailabilityResponse, BookingConfirmation, SlotsResponse};
use slotbook_common::ApiError;
use std::sync::Arc;
use tracing::info;

use crate::logic::{
    compute_slots, fetch_availability, submit_booking, AvailabilityRequest, BookRequest,
    SlotsRequest,
};
use crate::state::BookingState;

pub const AVAILABILITY_FAILED: &str = "Failed to fetch availability";
pub const BOOKING_FAILED: &str = "Failed to create event";
pub const SLOTS_FAILED: &str = "Failed to compute slots";

/// Scheduling configuration and busy intervals for the look-ahead window.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/availability",
    request_body = AvailabilityRequest,
    responses(
        (status = 200, description = "Busy intervals, event type and weekly availability", body = AvailabilityResponse),
        (status = 400, description = "Missing access token or malformed body", body = slotbook_common::http::ErrorBody),
        (status = 500, description = "Storage or calendar failure", body = slotbook_common::http::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn availability_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<AvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let request = accept_json(payload, AVAILABILITY_FAILED)?;

    match fetch_availability(&state, request.access_token.as_deref()).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            log_error(&e, AVAILABILITY_FAILED);
            Err(ApiError::new(AVAILABILITY_FAILED, e))
        }
    }
}

/// Creates the calendar event, stores the booking and emails the guest.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/book",
    request_body = BookRequest,
    responses(
        (status = 200, description = "Event created and booking saved", body = BookingConfirmation),
        (status = 400, description = "Missing booking data or malformed body", body = slotbook_common::http::ErrorBody),
        (status = 500, description = "Calendar or storage failure", body = slotbook_common::http::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn book_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookingConfirmation>, ApiError> {
    let request = accept_json(payload, BOOKING_FAILED)?;
    let booking = request
        .validate()
        .map_err(|e| ApiError::new(BOOKING_FAILED, e))?;
    info!(slot = %booking.selected_slot, "Booking request received");

    match submit_booking(&state, booking).await {
        Ok(confirmation) => Ok(Json(confirmation)),
        Err(e) => {
            log_error(&e, BOOKING_FAILED);
            Err(ApiError::new(BOOKING_FAILED, e))
        }
    }
}

/// Bookable start times for one day, computed on the server.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/slots",
    request_body = SlotsRequest,
    responses(
        (status = 200, description = "Slot start times for the requested day", body = SlotsResponse),
        (status = 400, description = "Missing token or date, unknown time zone", body = slotbook_common::http::ErrorBody),
        (status = 500, description = "Storage or calendar failure", body = slotbook_common::http::ErrorBody)
    ),
    tag = "Booking"
))]
pub async fn slots_handler(
    State(state): State<Arc<BookingState>>,
    payload: Result<Json<SlotsRequest>, JsonRejection>,
) -> Result<Json<SlotsResponse>, ApiError> {
    let request = accept_json(payload, SLOTS_FAILED)?;

    compute_slots(&state, request)
        .await
        .map(Json)
        .map_err(|e| {
            log_error(&e, SLOTS_FAILED);
            ApiError::new(SLOTS_FAILED, e)
        })
}
