// --- File: crates/slotbook_common/src/models.rs ---

// Data contracts shared by the storage layer, the calendar client, the HTTP
// handlers and the widget client. Field names follow the stored rows
// (`buffer_time`, `day_of_week`, ...) while envelope fields use camelCase.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parses a wall-clock time as stored in the availability template.
/// Accepts `HH:MM` and `HH:MM:SS` (the form SQL `time` columns render).
pub fn parse_wall_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
}

/// Renders a wall-clock time as `HH:MM`.
pub fn format_wall_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

mod wall_time {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wall_time(time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_time(&raw)
            .map_err(|e| de::Error::custom(format!("invalid time {:?}: {}", raw, e)))
    }
}

/// Singleton configuration row: meeting length and the buffer kept after busy blocks.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    /// Minutes.
    pub duration: i64,
    /// Minutes appended after each busy interval.
    #[serde(default)]
    pub buffer_time: i64,
}

/// One weekday row of the weekly availability template.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u32,
    #[serde(with = "wall_time")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "wall_time")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "17:00"))]
    pub end_time: NaiveTime,
}

/// A time range the external calendar reports as unavailable.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start: DateTime<Utc>,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub end: DateTime<Utc>,
}

/// Contact details the visitor enters in the booking form.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The signed-in calendar owner, in the shape the Google userinfo endpoint returns.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A persisted booking row.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub guest_name: String,
    pub guest_email: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub start_time: DateTime<Utc>,
    pub google_calendar_event_id: String,
    /// Opaque token generated by storage, used in the cancellation link.
    pub cancellation_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = DateTime))]
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a booking. Storage fills in id, cancellation id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBooking {
    pub guest_name: String,
    pub guest_email: String,
    pub start_time: DateTime<Utc>,
    pub google_calendar_event_id: String,
}

/// Everything needed to insert the calendar event for a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingRequest {
    pub summary: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// IANA zone recorded on the event, if configured.
    pub time_zone: Option<String>,
    pub guest_name: String,
    pub guest_email: String,
    pub organizer: OrganizerProfile,
    /// Unique id for the conference (video link) create request.
    pub conference_request_id: String,
}

/// What the calendar returned after inserting an event.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreatedEvent {
    pub id: Option<String>,
    pub hangout_link: Option<String>,
    pub html_link: Option<String>,
    pub status: Option<String>,
    /// The full event object, returned to the caller untouched.
    pub raw: Value,
}

/// Represents the result of a notification operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Provider-side id of the message.
    pub id: String,
    pub status: String,
}

/// Success body of the availability endpoint.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub busy: Vec<BusyInterval>,
    #[serde(rename = "eventType")]
    pub event_type: EventType,
    pub availability: Vec<Availability>,
}

/// Success body of the booking endpoint.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    pub message: String,
    /// The external calendar event object.
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub data: Value,
}

/// Success body of the server-side slot computation endpoint.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotsResponse {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date))]
    pub date: NaiveDate,
    #[serde(rename = "timeZone")]
    pub time_zone: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>))]
    pub slots: Vec<DateTime<FixedOffset>>,
}
