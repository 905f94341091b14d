// --- File: crates/slotbook_booking/src/test_support.rs ---
//! Recording stubs for the three collaborators of the booking flow.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use serde_json::json;
use slotbook_common::models::{
    Availability, Booking, BusyInterval, CreatedEvent, EventType, MeetingRequest, NewBooking,
    NotificationResult,
};
use slotbook_common::services::{
    BookingStore, BoxFuture, BoxedError, CalendarService, NotificationService,
};
use slotbook_config::{AppConfig, AppSettings, GcalConfig};
use std::sync::{Arc, Mutex};

use crate::state::BookingState;

pub fn fail(message: &str) -> BoxedError {
    BoxedError(message.into())
}

#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCall {
    FreeBusy {
        access_token: String,
        calendar_id: String,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    Create(MeetingRequest),
    Delete(String),
}

pub struct RecordingCalendar {
    pub busy: Vec<BusyInterval>,
    pub created: CreatedEvent,
    pub fail_busy: bool,
    pub fail_create: bool,
    pub fail_delete: bool,
    pub calls: Mutex<Vec<CalendarCall>>,
}

impl Default for RecordingCalendar {
    fn default() -> Self {
        Self {
            busy: Vec::new(),
            created: created_event("evt_123", Some("https://meet.google.com/abc-defg-hij")),
            fail_busy: false,
            fail_create: false,
            fail_delete: false,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingCalendar {
    pub fn calls(&self) -> Vec<CalendarCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                CalendarCall::Delete(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

pub fn created_event(id: &str, hangout_link: Option<&str>) -> CreatedEvent {
    CreatedEvent {
        id: Some(id.to_string()),
        hangout_link: hangout_link.map(str::to_string),
        html_link: Some(format!("https://calendar.google.com/event?eid={}", id)),
        status: Some("confirmed".to_string()),
        raw: json!({ "id": id, "hangoutLink": hangout_link, "status": "confirmed" }),
    }
}

impl CalendarService for RecordingCalendar {
    type Error = BoxedError;

    fn get_busy_times(
        &self,
        access_token: &str,
        calendar_id: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> BoxFuture<'_, Vec<BusyInterval>, Self::Error> {
        self.calls.lock().unwrap().push(CalendarCall::FreeBusy {
            access_token: access_token.to_string(),
            calendar_id: calendar_id.to_string(),
            start: start_time,
            end: end_time,
        });
        let result = if self.fail_busy {
            Err(fail("invalid_grant"))
        } else {
            Ok(self.busy.clone())
        };
        Box::pin(async move { result })
    }

    fn create_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        meeting: MeetingRequest,
    ) -> BoxFuture<'_, CreatedEvent, Self::Error> {
        self.calls.lock().unwrap().push(CalendarCall::Create(meeting));
        let result = if self.fail_create {
            Err(fail("Request had insufficient authentication scopes."))
        } else {
            Ok(self.created.clone())
        };
        Box::pin(async move { result })
    }

    fn delete_event(
        &self,
        _access_token: &str,
        _calendar_id: &str,
        event_id: &str,
    ) -> BoxFuture<'_, (), Self::Error> {
        self.calls
            .lock()
            .unwrap()
            .push(CalendarCall::Delete(event_id.to_string()));
        let result = if self.fail_delete {
            Err(fail("Backend Error"))
        } else {
            Ok(())
        };
        Box::pin(async move { result })
    }
}

pub struct StubStore {
    pub event_type: Option<EventType>,
    pub availability: Vec<Availability>,
    pub fail_reads: bool,
    pub insert_error: Option<String>,
    pub inserted: Mutex<Vec<NewBooking>>,
}

impl Default for StubStore {
    fn default() -> Self {
        Self {
            event_type: Some(EventType {
                duration: 30,
                buffer_time: 0,
            }),
            availability: vec![weekday_row(1, 9, 17)],
            fail_reads: false,
            insert_error: None,
            inserted: Mutex::new(Vec::new()),
        }
    }
}

impl StubStore {
    pub fn inserted(&self) -> Vec<NewBooking> {
        self.inserted.lock().unwrap().clone()
    }
}

pub fn weekday_row(day_of_week: u32, start_hour: u32, end_hour: u32) -> Availability {
    Availability {
        day_of_week,
        start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
    }
}

impl BookingStore for StubStore {
    type Error = BoxedError;

    fn get_event_type(&self) -> BoxFuture<'_, Option<EventType>, Self::Error> {
        let result = if self.fail_reads {
            Err(fail("no such table: event_types"))
        } else {
            Ok(self.event_type)
        };
        Box::pin(async move { result })
    }

    fn list_availabilities(&self) -> BoxFuture<'_, Vec<Availability>, Self::Error> {
        let result = if self.fail_reads {
            Err(fail("no such table: availabilities"))
        } else {
            Ok(self.availability.clone())
        };
        Box::pin(async move { result })
    }

    fn insert_booking(&self, booking: NewBooking) -> BoxFuture<'_, Booking, Self::Error> {
        self.inserted.lock().unwrap().push(booking.clone());
        let result = match &self.insert_error {
            Some(message) => Err(fail(message)),
            None => Ok(Booking {
                id: 1,
                guest_name: booking.guest_name,
                guest_email: booking.guest_email,
                start_time: booking.start_time,
                google_calendar_event_id: booking.google_calendar_event_id,
                cancellation_id: "0f1e2d3c4b5a69788796a5b4c3d2e1f0".to_string(),
                created_at: Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap(),
            }),
        };
        Box::pin(async move { result })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub is_html: bool,
}

#[derive(Default)]
pub struct RecordingMailer {
    pub fail: bool,
    pub sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

impl NotificationService for RecordingMailer {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            is_html,
        });
        let result = if self.fail {
            Err(fail("The gmail.com domain is not verified"))
        } else {
            Ok(NotificationResult {
                id: "msg_1".to_string(),
                status: "sent".to_string(),
            })
        };
        Box::pin(async move { result })
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        gcal: Some(GcalConfig {
            calendar_id: Some("primary".to_string()),
            time_zone: Some("Europe/Madrid".to_string()),
            availability_window_days: Some(7),
            client_id: None,
        }),
        app: Some(AppSettings {
            public_base_url: "https://book.example.com/".to_string(),
        }),
        ..Default::default()
    }
}

pub struct Harness {
    pub calendar: Arc<RecordingCalendar>,
    pub store: Arc<StubStore>,
    pub mailer: Arc<RecordingMailer>,
    pub state: Arc<BookingState>,
}

pub fn harness(calendar: RecordingCalendar, store: StubStore, mailer: RecordingMailer) -> Harness {
    harness_with_config(test_config(), calendar, store, mailer)
}

pub fn harness_with_config(
    config: AppConfig,
    calendar: RecordingCalendar,
    store: StubStore,
    mailer: RecordingMailer,
) -> Harness {
    let calendar = Arc::new(calendar);
    let store = Arc::new(store);
    let mailer = Arc::new(mailer);
    let state = BookingState::new(
        Arc::new(config),
        calendar.clone(),
        store.clone(),
        mailer.clone(),
    )
    .unwrap();

    Harness {
        calendar,
        store,
        mailer,
        state: Arc::new(state),
    }
}
