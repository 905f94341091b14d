// --- File: crates/slotbook_booking/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use crate::handlers::{availability_handler, book_handler, slots_handler};
use crate::state::BookingState;

/// Booking routes, mounted by the backend under `/api`.
pub fn routes(state: Arc<BookingState>) -> Router {
    Router::new()
        .route("/availability", post(availability_handler))
        .route("/book", post(book_handler))
        .route("/slots", post(slots_handler))
        .with_state(state)
}
