// --- File: crates/slotbook_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/slotbook.db, may carry credentials
    pub max_connections: Option<u32>,
}

// --- Google Calendar Config ---
// The calendar is always accessed with the visitor's own bearer token,
// so no service account key is configured here.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GcalConfig {
    pub calendar_id: Option<String>,           // defaults to "primary"
    pub time_zone: Option<String>,             // IANA name used for event times and emails
    pub availability_window_days: Option<i64>, // free/busy look-ahead, defaults to 7
    pub client_id: Option<String>,             // OAuth client id handed to the widget
}

// --- Mail Config ---
// Holds non-secret mail config. The API key is usually "secret_from_env" (MAIL_API_KEY).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MailConfig {
    pub api_url: Option<String>, // defaults to https://api.resend.com
    pub api_key: String,
    pub from: String,
    pub brand_name: Option<String>,
}

// --- Public application settings ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppSettings {
    /// Base URL the cancellation links are built from.
    pub public_base_url: String,
}

/// Event type row written to an empty `event_types` table on startup.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventTypeSeed {
    pub duration: i64,
    #[serde(default)]
    pub buffer_time: i64,
}

/// Weekly template row written to an empty `availabilities` table on startup.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AvailabilitySeed {
    pub day_of_week: i64,
    pub start_time: String,
    pub end_time: String,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduleConfig {
    pub event_type: EventTypeSeed,
    #[serde(default)]
    pub availability: Vec<AvailabilitySeed>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_mail: bool,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub gcal: Option<GcalConfig>,
    #[serde(default)]
    pub mail: Option<MailConfig>,
    #[serde(default)]
    pub app: Option<AppSettings>,
    #[serde(default)]
    pub schedule: Option<ScheduleConfig>,
}

impl AppConfig {
    pub fn calendar_id(&self) -> &str {
        self.gcal
            .as_ref()
            .and_then(|g| g.calendar_id.as_deref())
            .unwrap_or("primary")
    }

    pub fn time_zone_name(&self) -> &str {
        self.gcal
            .as_ref()
            .and_then(|g| g.time_zone.as_deref())
            .unwrap_or("UTC")
    }

    pub fn availability_window_days(&self) -> i64 {
        self.gcal
            .as_ref()
            .and_then(|g| g.availability_window_days)
            .filter(|days| *days > 0)
            .unwrap_or(7)
    }

    pub fn public_base_url(&self) -> &str {
        self.app
            .as_ref()
            .map(|a| a.public_base_url.trim_end_matches('/'))
            .unwrap_or("")
    }
}
