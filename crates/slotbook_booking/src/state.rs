// --- File: crates/slotbook_booking/src/state.rs ---
use chrono_tz::Tz;
use slotbook_common::error::{config_error, SchedulingError};
use slotbook_common::services::{BookingStore, BoxedError, CalendarService, NotificationService};
use slotbook_config::AppConfig;
use slotbook_mail::ConfirmationRenderer;
use std::sync::Arc;

const DEFAULT_BRAND_NAME: &str = "slotbook";

/// Shared, immutable state of the booking endpoints.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub calendar: Arc<dyn CalendarService<Error = BoxedError>>,
    pub store: Arc<dyn BookingStore<Error = BoxedError>>,
    pub notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    pub renderer: Arc<ConfirmationRenderer>,
    /// Zone event times are recorded in and emails are formatted in.
    pub time_zone: Tz,
}

impl BookingState {
    pub fn new(
        config: Arc<AppConfig>,
        calendar: Arc<dyn CalendarService<Error = BoxedError>>,
        store: Arc<dyn BookingStore<Error = BoxedError>>,
        notifier: Arc<dyn NotificationService<Error = BoxedError>>,
    ) -> Result<Self, SchedulingError> {
        let time_zone: Tz = config.time_zone_name().parse().map_err(|e| {
            config_error(format!(
                "invalid gcal.time_zone {:?}: {}",
                config.time_zone_name(),
                e
            ))
        })?;
        let brand_name = config
            .mail
            .as_ref()
            .and_then(|m| m.brand_name.clone())
            .unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string());
        let renderer = ConfirmationRenderer::new(brand_name, time_zone)?;

        Ok(Self {
            config,
            calendar,
            store,
            notifier,
            renderer: Arc::new(renderer),
            time_zone,
        })
    }
}
