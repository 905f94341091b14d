// --- File: crates/slotbook_widget/src/view.rs ---
//! Screen view models. Strings are Spanish, matching the email template.

use chrono::{DateTime, Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use slotbook_common::models::format_wall_time;

use crate::session::{Scheduler, SchedulerState};

pub const LOGIN_TITLE: &str = "Agenda una llamada";
pub const LOGIN_PROMPT: &str = "Usa tu cuenta de Google para ver los horarios disponibles.";
pub const LOAD_PROMPT: &str = "Haz clic para cargar tu disponibilidad";
pub const NO_SLOTS_MESSAGE: &str = "No hay horarios disponibles para este día.";
pub const CONFIRMED_TITLE: &str = "¡Cita Agendada!";
pub const CONFIRMED_BODY: &str = "Tú y tu invitado recibirán una confirmación por correo.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayButton {
    pub date: NaiveDate,
    /// Abbreviated weekday name.
    pub weekday: String,
    pub day_of_month: u32,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    pub start: DateTime<Utc>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login {
        title: &'static str,
        prompt: &'static str,
    },
    LoadAvailability {
        greeting: String,
        prompt: &'static str,
    },
    Calendar {
        days: Vec<DayButton>,
        heading: String,
        time_zone: String,
        slots: Vec<SlotButton>,
        /// Set when `slots` is empty.
        empty_message: Option<&'static str>,
    },
    BookingForm {
        summary: String,
    },
    Confirmation {
        title: &'static str,
        body: &'static str,
    },
}

fn format_day(day: NaiveDate, format: &str) -> String {
    day.and_time(NaiveTime::MIN)
        .and_utc()
        .format_localized(format, Locale::es_ES)
        .to_string()
}

/// `HH:MM` label of a slot in its own zone.
pub fn slot_label<Z: TimeZone>(slot: &DateTime<Z>) -> String {
    format_wall_time(&slot.naive_local().time())
}

pub fn day_buttons(days: &[NaiveDate], selected: NaiveDate) -> Vec<DayButton> {
    days.iter()
        .map(|day| DayButton {
            date: *day,
            weekday: format_day(*day, "%a"),
            day_of_month: chrono::Datelike::day(day),
            selected: *day == selected,
        })
        .collect()
}

/// e.g. "Horarios disponibles para lunes, 5 de mayo".
pub fn slots_heading(day: NaiveDate) -> String {
    format!(
        "Horarios disponibles para {}",
        format_day(day, "%A, %-d de %B")
    )
}

/// e.g. "Estás agendando una cita de 30 minutos para el lunes 5 de mayo a las 11:00".
pub fn booking_summary(duration_minutes: i64, slot: DateTime<Utc>, tz: &Tz) -> String {
    format!(
        "Estás agendando una cita de {} minutos para el {}",
        duration_minutes,
        slot.with_timezone(tz)
            .format_localized("%A %-d de %B a las %H:%M", Locale::es_ES)
    )
}

pub fn greeting(name: Option<&str>) -> String {
    match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => format!("¡Sesión iniciada como {}!", name),
        None => "¡Sesión iniciada!".to_string(),
    }
}

/// The screen to draw for the scheduler's current state.
pub fn screen(scheduler: &Scheduler) -> Screen {
    match scheduler.state() {
        SchedulerState::LoggedOut => Screen::Login {
            title: LOGIN_TITLE,
            prompt: LOGIN_PROMPT,
        },
        SchedulerState::LoggedIn { session } => Screen::LoadAvailability {
            greeting: greeting(session.profile.as_ref().map(|p| p.name.as_str())),
            prompt: LOAD_PROMPT,
        },
        SchedulerState::AvailabilityLoaded { schedule, .. } => {
            let slots: Vec<SlotButton> = scheduler
                .available_slots()
                .iter()
                .map(|slot| SlotButton {
                    start: slot.with_timezone(&Utc),
                    label: slot_label(slot),
                })
                .collect();
            Screen::Calendar {
                days: day_buttons(&schedule.offered_days(), schedule.selected_day),
                heading: slots_heading(schedule.selected_day),
                time_zone: scheduler.time_zone().name().to_string(),
                empty_message: slots.is_empty().then_some(NO_SLOTS_MESSAGE),
                slots,
            }
        }
        SchedulerState::SlotSelected { schedule, slot, .. } => Screen::BookingForm {
            summary: booking_summary(
                schedule.data.event_type.duration,
                *slot,
                &scheduler.time_zone(),
            ),
        },
        SchedulerState::Confirmed { .. } => Screen::Confirmation {
            title: CONFIRMED_TITLE,
            body: CONFIRMED_BODY,
        },
    }
}
