// --- File: crates/slotbook_common/src/services.rs ---
//! Service abstractions for the external collaborators.
//!
//! The handlers are written against these traits so the calendar, the
//! storage layer and the mail provider can be swapped for recording stubs
//! in tests. Methods return a [`BoxFuture`] to stay object-safe.

use chrono::{DateTime, Utc};
use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::models::{
    Availability, Booking, BusyInterval, CreatedEvent, EventType, MeetingRequest, NewBooking,
    NotificationResult,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A wrapper error type that implements std::error::Error for Box<dyn std::error::Error + Send + Sync>
#[derive(Debug)]
pub struct BoxedError(pub Box<dyn StdError + Send + Sync>);

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

fn boxed<E: StdError + Send + Sync + 'static>(err: E) -> BoxedError {
    BoxedError(Box::new(err))
}

/// Calendar operations, always performed on behalf of the bearer of `access_token`.
pub trait CalendarService: Send + Sync {
    /// Error type returned by calendar service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Busy intervals of `calendar_id` within `[start_time, end_time]`.
    fn get_busy_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error>;

    /// Insert an event with a video-conference create request.
    fn create_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        meeting: MeetingRequest,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error>;

    /// Delete an event. Used as the compensating action of a failed booking.
    fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error>;
}

/// Scheduling configuration reads and booking writes.
pub trait BookingStore: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// The singleton event type row, `None` when the table is empty.
    fn get_event_type(&self) -> BoxFuture<'_, Option<EventType>, Self::Error>;

    /// All weekly availability rows, in storage order.
    fn list_availabilities(&self) -> BoxFuture<'_, Vec<Availability>, Self::Error>;

    /// Persist a booking and return the stored row, including the generated cancellation id.
    fn insert_booking(&self, booking: NewBooking) -> BoxFuture<'_, Booking, Self::Error>;
}

/// A trait for notification service operations.
pub trait NotificationService: Send + Sync {
    /// Error type returned by notification service operations.
    type Error: StdError + Send + Sync + 'static;

    /// Send an email notification.
    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error>;
}

/// Adapter erasing a service's concrete error into [`BoxedError`], so
/// implementations can be stored as `Arc<dyn Trait<Error = BoxedError>>`.
pub struct Boxed<S>(pub S);

impl<S: CalendarService> CalendarService for Boxed<S> {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        let fut = self
            .0
            .get_busy_times(access_token, calendar_id, start_time, end_time);
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn create_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        meeting: MeetingRequest,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        let fut = self.0.create_event(access_token, calendar_id, meeting);
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn delete_event(
        &self,
        access_token: &str,
        calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error> {
        let fut = self.0.delete_event(access_token, calendar_id, event_id);
        Box::pin(async move { fut.await.map_err(boxed) })
    }
}

impl<S: BookingStore> BookingStore for Boxed<S> {
    type Error = BoxedError;

    fn get_event_type(&self) -> BoxFuture<'_, Option<EventType>, Self::Error> {
        let fut = self.0.get_event_type();
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn list_availabilities(&self) -> BoxFuture<'_, Vec<Availability>, Self::Error> {
        let fut = self.0.list_availabilities();
        Box::pin(async move { fut.await.map_err(boxed) })
    }

    fn insert_booking(&self, booking: NewBooking) -> BoxFuture<'_, Booking, Self::Error> {
        let fut = self.0.insert_booking(booking);
        Box::pin(async move { fut.await.map_err(boxed) })
    }
}

impl<S: NotificationService> NotificationService for Boxed<S> {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.0.send_email(to, subject, body, is_html);
        Box::pin(async move { fut.await.map_err(boxed) })
    }
}
