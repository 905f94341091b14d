// --- File: crates/slotbook_booking/src/doc.rs ---
#![cfg(feature = "openapi")]

use slotbook_common::http::ErrorBody;
use slotbook_common::models::{
    Availability, AvailabilityResponse, BookingConfirmation, BookingDetails, BusyInterval,
    EventType, OrganizerProfile, SlotsResponse,
};
use utoipa::OpenApi;

use crate::logic::{AvailabilityRequest, BookRequest, SlotsRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::availability_handler,
        crate::handlers::book_handler,
        crate::handlers::slots_handler
    ),
    components(
        schemas(
            AvailabilityRequest,
            AvailabilityResponse,
            Availability,
            BusyInterval,
            EventType,
            BookRequest,
            BookingDetails,
            OrganizerProfile,
            BookingConfirmation,
            SlotsRequest,
            SlotsResponse,
            ErrorBody
        )
    ),
    tags(
        (name = "Booking", description = "Availability and booking API")
    ),
    servers(
        (url = "/api", description = "Booking API server")
    )
)]
pub struct BookingApiDoc;
