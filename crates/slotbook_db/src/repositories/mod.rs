//! Repositories for the scheduling tables

pub mod booking_sql;

pub use booking_sql::SqlBookingStore;
