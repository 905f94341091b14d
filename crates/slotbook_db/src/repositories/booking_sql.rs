//! SQL implementation of the booking store
//!
//! Timestamps are stored as RFC 3339 text and wall-clock times as `HH:MM`
//! text, since the `Any` driver has no portable date/time types.

use crate::error::DbError;
use crate::DbClient;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use slotbook_common::models::{
    format_wall_time, parse_wall_time, Availability, Booking, EventType, NewBooking,
};
use slotbook_common::services::{BookingStore, BoxFuture};
use slotbook_config::ScheduleConfig;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS event_types (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        duration INTEGER NOT NULL,
        buffer_time INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS availabilities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        day_of_week INTEGER NOT NULL CHECK (day_of_week BETWEEN 0 AND 6),
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL
    )
    "#,
    // start_time is unique: a second booking for the same slot fails to persist
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        guest_name TEXT NOT NULL,
        guest_email TEXT NOT NULL,
        start_time TEXT NOT NULL UNIQUE,
        google_calendar_event_id TEXT NOT NULL,
        cancellation_id TEXT NOT NULL UNIQUE DEFAULT (lower(hex(randomblob(16)))),
        created_at TEXT NOT NULL
    )
    "#,
];

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn availability_from_row(row: &AnyRow) -> Result<Availability, DbError> {
    let day_of_week: i64 = row.try_get("day_of_week")?;
    let start_time: String = row.try_get("start_time")?;
    let end_time: String = row.try_get("end_time")?;

    Ok(Availability {
        day_of_week: u32::try_from(day_of_week)
            .ok()
            .filter(|d| *d <= 6)
            .ok_or_else(|| DbError::MappingError(format!("day_of_week {}", day_of_week)))?,
        start_time: parse_wall_time(&start_time)
            .map_err(|e| DbError::MappingError(format!("start_time {:?}: {}", start_time, e)))?,
        end_time: parse_wall_time(&end_time)
            .map_err(|e| DbError::MappingError(format!("end_time {:?}: {}", end_time, e)))?,
    })
}

/// SQL implementation of [`BookingStore`]
#[derive(Debug, Clone)]
pub struct SqlBookingStore {
    db_client: DbClient,
}

impl SqlBookingStore {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// Creates the `event_types`, `availabilities` and `bookings` tables if missing.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing scheduling schema");
        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }
        info!("Scheduling schema initialized successfully");
        Ok(())
    }

    async fn count(&self, table: &str) -> Result<i64, DbError> {
        let row = sqlx::query(&format!("SELECT COUNT(*) AS n FROM {}", table))
            .fetch_one(self.db_client.pool())
            .await?;
        Ok(row.try_get("n")?)
    }

    /// Writes the configured event type and weekly template into empty tables.
    /// Tables that already hold rows are left alone.
    pub async fn seed_defaults(&self, schedule: &ScheduleConfig) -> Result<(), DbError> {
        if self.count("event_types").await? == 0 {
            sqlx::query("INSERT INTO event_types (duration, buffer_time) VALUES ($1, $2)")
                .bind(schedule.event_type.duration)
                .bind(schedule.event_type.buffer_time)
                .execute(self.db_client.pool())
                .await?;
            info!(
                duration = schedule.event_type.duration,
                buffer_time = schedule.event_type.buffer_time,
                "Seeded event type"
            );
        }

        if self.count("availabilities").await? == 0 {
            for seed in &schedule.availability {
                if !(0..=6).contains(&seed.day_of_week) {
                    return Err(DbError::ConfigError(format!(
                        "day_of_week must be 0-6, got {}",
                        seed.day_of_week
                    )));
                }
                let start = parse_wall_time(&seed.start_time)
                    .map_err(|e| DbError::ConfigError(format!("start_time {:?}: {}", seed.start_time, e)))?;
                let end = parse_wall_time(&seed.end_time)
                    .map_err(|e| DbError::ConfigError(format!("end_time {:?}: {}", seed.end_time, e)))?;

                sqlx::query(
                    "INSERT INTO availabilities (day_of_week, start_time, end_time) VALUES ($1, $2, $3)",
                )
                .bind(seed.day_of_week)
                .bind(format_wall_time(&start))
                .bind(format_wall_time(&end))
                .execute(self.db_client.pool())
                .await?;
            }
            info!("Seeded {} availability rows", schedule.availability.len());
        }

        Ok(())
    }

    pub async fn fetch_event_type(&self) -> Result<Option<EventType>, DbError> {
        let row = sqlx::query("SELECT duration, buffer_time FROM event_types ORDER BY id LIMIT 1")
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to read event type: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        row.map(|row| -> Result<EventType, DbError> {
            Ok(EventType {
                duration: row.try_get("duration")?,
                buffer_time: row.try_get("buffer_time")?,
            })
        })
        .transpose()
    }

    pub async fn fetch_availabilities(&self) -> Result<Vec<Availability>, DbError> {
        let rows = sqlx::query(
            "SELECT day_of_week, start_time, end_time FROM availabilities ORDER BY id",
        )
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to read availabilities: {}", e);
            DbError::QueryError(e.to_string())
        })?;

        rows.iter().map(availability_from_row).collect()
    }

    /// Inserts the booking and returns the committed row.
    ///
    /// Only the generated `id` and `cancellation_id` are read back; the
    /// other fields come from `booking`, so once the insert has committed
    /// nothing can fail while building the result.
    pub async fn create_booking(&self, booking: NewBooking) -> Result<Booking, DbError> {
        debug!(start_time = %booking.start_time, "Persisting booking");

        let start_time = booking.start_time.trunc_subsecs(0);
        let created_at = Utc::now().trunc_subsecs(0);

        let query = r#"
            INSERT INTO bookings (guest_name, guest_email, start_time, google_calendar_event_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, cancellation_id
        "#;

        let (id, cancellation_id): (i64, String) = sqlx::query_as(query)
            .bind(&booking.guest_name)
            .bind(&booking.guest_email)
            .bind(timestamp(&start_time))
            .bind(&booking.google_calendar_event_id)
            .bind(timestamp(&created_at))
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert booking: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!(id, "Booking persisted");
        Ok(Booking {
            id,
            guest_name: booking.guest_name,
            guest_email: booking.guest_email,
            start_time,
            google_calendar_event_id: booking.google_calendar_event_id,
            cancellation_id,
            created_at,
        })
    }
}

impl BookingStore for SqlBookingStore {
    type Error = DbError;

    fn get_event_type(&self) -> BoxFuture<'_, Option<EventType>, Self::Error> {
        Box::pin(self.fetch_event_type())
    }

    fn list_availabilities(&self) -> BoxFuture<'_, Vec<Availability>, Self::Error> {
        Box::pin(self.fetch_availabilities())
    }

    fn insert_booking(&self, booking: NewBooking) -> BoxFuture<'_, Booking, Self::Error> {
        Box::pin(self.create_booking(booking))
    }
}
