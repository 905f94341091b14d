// --- File: crates/slotbook_widget/src/session.rs ---
//! The widget's screen flow as an explicit state machine.
//!
//! ```text
//! LoggedOut -> LoggedIn -> AvailabilityLoaded -> SlotSelected -> Confirmed
//! ```
//!
//! `logout` is accepted from every state, `clear_schedule` from every
//! signed-in state, and `cancel` / `book_another` return to the slot grid.
//! Every other action is validated against the current state and rejected
//! with a [`TransitionError`] that leaves the state as it was.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use slotbook_common::models::{
    AvailabilityResponse, BookingConfirmation, BookingDetails, OrganizerProfile,
};
use slotbook_gcal::{generate_slots, week_days};
use tracing::{debug, info};

use crate::client::BookingSubmission;
use crate::error::{ClientError, TransitionError};

/// Number of days offered by the day picker, starting today.
pub const PICKER_DAYS: usize = 7;

/// The signed-in visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    /// Arrives from the userinfo endpoint after login, may lag behind it.
    pub profile: Option<OrganizerProfile>,
}

/// Availability as loaded from the backend plus the picked day.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub today: NaiveDate,
    pub selected_day: NaiveDate,
    pub data: AvailabilityResponse,
}

impl Schedule {
    pub fn offered_days(&self) -> Vec<NaiveDate> {
        week_days(self.today, PICKER_DAYS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerState {
    LoggedOut,
    LoggedIn {
        session: Session,
    },
    AvailabilityLoaded {
        session: Session,
        schedule: Schedule,
    },
    SlotSelected {
        session: Session,
        schedule: Schedule,
        slot: DateTime<Utc>,
    },
    Confirmed {
        session: Session,
        schedule: Schedule,
        confirmation: BookingConfirmation,
    },
}

impl SchedulerState {
    pub fn name(&self) -> &'static str {
        match self {
            SchedulerState::LoggedOut => "logged out",
            SchedulerState::LoggedIn { .. } => "logged in",
            SchedulerState::AvailabilityLoaded { .. } => "browsing availability",
            SchedulerState::SlotSelected { .. } => "filling in the booking form",
            SchedulerState::Confirmed { .. } => "showing a confirmation",
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SchedulerState::LoggedOut => None,
            SchedulerState::LoggedIn { session }
            | SchedulerState::AvailabilityLoaded { session, .. }
            | SchedulerState::SlotSelected { session, .. }
            | SchedulerState::Confirmed { session, .. } => Some(session),
        }
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        match self {
            SchedulerState::AvailabilityLoaded { schedule, .. }
            | SchedulerState::SlotSelected { schedule, .. }
            | SchedulerState::Confirmed { schedule, .. } => Some(schedule),
            _ => None,
        }
    }

    fn session_mut(&mut self) -> Option<&mut Session> {
        match self {
            SchedulerState::LoggedOut => None,
            SchedulerState::LoggedIn { session }
            | SchedulerState::AvailabilityLoaded { session, .. }
            | SchedulerState::SlotSelected { session, .. }
            | SchedulerState::Confirmed { session, .. } => Some(session),
        }
    }
}

/// Owns the current [`SchedulerState`] and the visitor's time zone.
#[derive(Debug, Clone)]
pub struct Scheduler {
    time_zone: Tz,
    state: SchedulerState,
}

impl Scheduler {
    pub fn new(time_zone: Tz) -> Self {
        Self {
            time_zone,
            state: SchedulerState::LoggedOut,
        }
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    fn rejected(&self, action: &'static str) -> TransitionError {
        TransitionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    pub fn login(&mut self, access_token: impl Into<String>) -> Result<(), TransitionError> {
        let access_token = access_token.into();
        if !matches!(self.state, SchedulerState::LoggedOut) || access_token.trim().is_empty() {
            return Err(self.rejected("log in"));
        }
        self.state = SchedulerState::LoggedIn {
            session: Session {
                access_token,
                profile: None,
            },
        };
        info!("Signed in");
        Ok(())
    }

    /// Attaches the organizer profile once the userinfo call returns.
    pub fn set_profile(&mut self, profile: OrganizerProfile) -> Result<(), TransitionError> {
        let rejected = self.rejected("set the profile");
        let session = self.state.session_mut().ok_or(rejected)?;
        session.profile = Some(profile);
        Ok(())
    }

    /// Stores a fresh availability response and opens the slot grid on `today`.
    pub fn load_availability(
        &mut self,
        data: AvailabilityResponse,
        today: NaiveDate,
    ) -> Result<(), TransitionError> {
        let session = match &self.state {
            SchedulerState::LoggedIn { session }
            | SchedulerState::AvailabilityLoaded { session, .. } => session.clone(),
            _ => return Err(self.rejected("load availability")),
        };
        debug!(
            busy = data.busy.len(),
            rows = data.availability.len(),
            "Availability loaded"
        );
        self.state = SchedulerState::AvailabilityLoaded {
            session,
            schedule: Schedule {
                today,
                selected_day: today,
                data,
            },
        };
        Ok(())
    }

    pub fn select_day(&mut self, day: NaiveDate) -> Result<(), TransitionError> {
        let rejected = self.rejected("select a day");
        match &mut self.state {
            SchedulerState::AvailabilityLoaded { schedule, .. } => {
                if !schedule.offered_days().contains(&day) {
                    return Err(TransitionError::DayNotOffered(day));
                }
                schedule.selected_day = day;
                Ok(())
            }
            _ => Err(rejected),
        }
    }

    /// Bookable start times for the selected day, in the visitor's zone.
    pub fn available_slots(&self) -> Vec<DateTime<Tz>> {
        match &self.state {
            SchedulerState::AvailabilityLoaded { schedule, .. }
            | SchedulerState::SlotSelected { schedule, .. } => generate_slots(
                schedule.selected_day,
                &schedule.data.availability,
                &schedule.data.event_type,
                &schedule.data.busy,
                &self.time_zone,
            ),
            _ => Vec::new(),
        }
    }

    /// Picks one of the slots [`Self::available_slots`] currently offers.
    pub fn select_slot(&mut self, slot: DateTime<Utc>) -> Result<(), TransitionError> {
        let (session, schedule) = match &self.state {
            SchedulerState::AvailabilityLoaded { session, schedule } => {
                (session.clone(), schedule.clone())
            }
            _ => return Err(self.rejected("select a slot")),
        };
        let offered = self
            .available_slots()
            .iter()
            .any(|candidate| candidate.with_timezone(&Utc) == slot);
        if !offered {
            return Err(TransitionError::SlotUnavailable(slot.to_rfc3339()));
        }

        self.state = SchedulerState::SlotSelected {
            session,
            schedule,
            slot,
        };
        Ok(())
    }

    /// Leaves the booking form and returns to the slot grid.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        match &self.state {
            SchedulerState::SlotSelected {
                session, schedule, ..
            } => {
                self.state = SchedulerState::AvailabilityLoaded {
                    session: session.clone(),
                    schedule: schedule.clone(),
                };
                Ok(())
            }
            _ => Err(self.rejected("cancel")),
        }
    }

    /// The request body for the booking endpoint.
    pub fn submission(&self, details: BookingDetails) -> Result<BookingSubmission, TransitionError> {
        match &self.state {
            SchedulerState::SlotSelected {
                session,
                schedule,
                slot,
            } => {
                let profile = session
                    .profile
                    .clone()
                    .ok_or(TransitionError::MissingProfile)?;
                Ok(BookingSubmission {
                    access_token: session.access_token.clone(),
                    selected_slot: *slot,
                    details,
                    profile,
                    duration: schedule.data.event_type.duration,
                })
            }
            _ => Err(self.rejected("submit a booking")),
        }
    }

    /// Moves to the confirmation screen when the booking call succeeded.
    /// A failed call keeps the form open and reports the backend's details.
    pub fn confirm(
        &mut self,
        outcome: Result<BookingConfirmation, ClientError>,
    ) -> Result<(), TransitionError> {
        let (session, schedule) = match &self.state {
            SchedulerState::SlotSelected {
                session, schedule, ..
            } => (session.clone(), schedule.clone()),
            _ => return Err(self.rejected("confirm a booking")),
        };
        let confirmation = outcome.map_err(|e| TransitionError::SubmissionFailed(e.details()))?;

        info!("Booking confirmed");
        self.state = SchedulerState::Confirmed {
            session,
            schedule,
            confirmation,
        };
        Ok(())
    }

    pub fn book_another(&mut self) -> Result<(), TransitionError> {
        match &self.state {
            SchedulerState::Confirmed {
                session, schedule, ..
            } => {
                self.state = SchedulerState::AvailabilityLoaded {
                    session: session.clone(),
                    schedule: schedule.clone(),
                };
                Ok(())
            }
            _ => Err(self.rejected("book another slot")),
        }
    }

    /// Drops loaded availability, keeping the visitor signed in.
    pub fn clear_schedule(&mut self) -> Result<(), TransitionError> {
        let session = match &self.state {
            SchedulerState::LoggedOut => return Err(self.rejected("clear the schedule")),
            other => other.session().cloned(),
        };
        if let Some(session) = session {
            self.state = SchedulerState::LoggedIn { session };
        }
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state = SchedulerState::LoggedOut;
        info!("Signed out");
    }
}
