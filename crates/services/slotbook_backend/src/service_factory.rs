// --- File: crates/services/slotbook_backend/src/service_factory.rs ---
//! Builds the collaborators of the booking endpoints from configuration.
use slotbook_common::error::{config_error, SchedulingError};
use slotbook_common::services::{
    BookingStore, Boxed, BoxedError, CalendarService, NotificationService,
};
use slotbook_common::logging::log_result;
use slotbook_config::AppConfig;
use slotbook_db::{DbClient, SqlBookingStore};
use slotbook_gcal::GoogleCalendarService;
use slotbook_mail::{LogNotificationService, ResendNotificationService};
use std::sync::Arc;
use tracing::{info, warn};

/// The three services the booking flow is written against.
pub struct SlotbookServices {
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    pub store: Arc<dyn BookingStore<Error = BoxedError>>,
    pub notifier: Arc<dyn NotificationService<Error = BoxedError>>,
}

impl SlotbookServices {
    /// Connects the database, creates and seeds the schema, and picks the
    /// mail transport according to `use_mail`.
    pub async fn from_config(config: &AppConfig) -> Result<Self, SchedulingError> {
        info!("Initializing booking store...");
        let db_client = DbClient::new(config).await?;
        let store = SqlBookingStore::new(db_client);
        log_result(
            store.init_schema().await,
            "Booking schema ready",
            "Failed to create the booking schema",
        )?;
        match config.schedule.as_ref() {
            Some(schedule) => store.seed_defaults(schedule).await?,
            None => warn!("No [schedule] section, the scheduling tables are not seeded"),
        }

        Ok(Self {
            calendar: Arc::new(Boxed(GoogleCalendarService::new())),
            store: Arc::new(Boxed(store)),
            notifier: notifier_from_config(config)?,
        })
    }
}

fn notifier_from_config(
    config: &AppConfig,
) -> Result<Arc<dyn NotificationService<Error = BoxedError>>, SchedulingError> {
    if !config.use_mail {
        info!("Mail disabled, confirmation emails are only logged");
        return Ok(Arc::new(Boxed(LogNotificationService)));
    }

    let mail_config = config
        .mail
        .as_ref()
        .ok_or_else(|| config_error("use_mail is set but the [mail] section is missing"))?;
    let service = ResendNotificationService::from_config(mail_config)?;
    info!("Confirmation emails are sent from {}", mail_config.from);
    Ok(Arc::new(Boxed(service)))
}
