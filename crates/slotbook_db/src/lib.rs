//! Booking storage for slotbook
//!
//! A client over an SQLx `Any` pool, plus the SQL implementation of the
//! `BookingStore` trait. The schema targets SQLite.
//!
//! ```rust,no_run
//! use slotbook_db::{DbClient, SqlBookingStore};
//!
//! async fn setup() -> Result<SqlBookingStore, slotbook_db::DbError> {
//!     let client = DbClient::from_url("sqlite:slotbook.db?mode=rwc", 5).await?;
//!     let store = SqlBookingStore::new(client);
//!     store.init_schema().await?;
//!     Ok(store)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::SqlBookingStore;
