#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
    use chrono_tz::Europe::Madrid;
    use serde_json::json;
    use slotbook_common::models::{
        Availability, AvailabilityResponse, BookingConfirmation, BookingDetails, BusyInterval,
        EventType, OrganizerProfile,
    };

    use crate::error::{ClientError, TransitionError};
    use crate::session::{Scheduler, SchedulerState};
    use crate::view::{screen, Screen, NO_SLOTS_MESSAGE};

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 5).unwrap()
    }

    fn availability() -> AvailabilityResponse {
        AvailabilityResponse {
            // 09:00-09:30 Madrid
            busy: vec![BusyInterval {
                start: Utc.with_ymd_and_hms(2025, 5, 5, 7, 0, 0).unwrap(),
                end: Utc.with_ymd_and_hms(2025, 5, 5, 7, 30, 0).unwrap(),
            }],
            event_type: EventType {
                duration: 30,
                buffer_time: 0,
            },
            availability: vec![Availability {
                day_of_week: 1,
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            }],
        }
    }

    fn profile() -> OrganizerProfile {
        OrganizerProfile {
            name: "Dr. Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    fn confirmation() -> BookingConfirmation {
        BookingConfirmation {
            message: "Event created and saved".to_string(),
            data: json!({ "id": "evt_1" }),
        }
    }

    /// 10:00 Madrid, the first slot not touching the busy block.
    fn ten_o_clock() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 5, 8, 0, 0).unwrap()
    }

    fn browsing() -> Scheduler {
        let mut scheduler = Scheduler::new(Madrid);
        scheduler.login("ya29.token").unwrap();
        scheduler.set_profile(profile()).unwrap();
        scheduler.load_availability(availability(), monday()).unwrap();
        scheduler
    }

    #[test]
    fn happy_path_reaches_confirmation() {
        let mut scheduler = browsing();
        let labels: Vec<String> = scheduler
            .available_slots()
            .iter()
            .map(crate::view::slot_label)
            .collect();
        assert_eq!(labels, vec!["10:00", "10:30"]);

        scheduler.select_slot(ten_o_clock()).unwrap();
        let submission = scheduler
            .submission(BookingDetails {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                notes: None,
            })
            .unwrap();
        assert_eq!(submission.access_token, "ya29.token");
        assert_eq!(submission.selected_slot, ten_o_clock());
        assert_eq!(submission.duration, 30);
        assert_eq!(submission.profile, profile());

        scheduler.confirm(Ok(confirmation())).unwrap();
        assert!(matches!(scheduler.state(), SchedulerState::Confirmed { .. }));

        scheduler.book_another().unwrap();
        assert!(matches!(
            scheduler.state(),
            SchedulerState::AvailabilityLoaded { .. }
        ));
    }

    #[test]
    fn slot_outside_the_grid_is_rejected() {
        let mut scheduler = browsing();
        let before = scheduler.state().clone();

        // 09:00 Madrid is busy
        let busy_slot = Utc.with_ymd_and_hms(2025, 5, 5, 7, 0, 0).unwrap();
        let err = scheduler.select_slot(busy_slot).unwrap_err();
        assert!(matches!(err, TransitionError::SlotUnavailable(_)));

        // Off-grid minute
        let off_grid = Utc.with_ymd_and_hms(2025, 5, 5, 8, 10, 0).unwrap();
        assert!(scheduler.select_slot(off_grid).is_err());
        assert_eq!(scheduler.state(), &before);
    }

    #[test]
    fn invalid_transitions_leave_state_intact() {
        let mut scheduler = Scheduler::new(Madrid);
        assert!(scheduler.select_slot(ten_o_clock()).is_err());
        assert!(scheduler.cancel().is_err());
        assert!(scheduler.book_another().is_err());
        assert!(scheduler.clear_schedule().is_err());
        assert!(scheduler.set_profile(profile()).is_err());
        assert!(scheduler.load_availability(availability(), monday()).is_err());
        assert_eq!(scheduler.state(), &SchedulerState::LoggedOut);

        scheduler.login("tok").unwrap();
        let err = scheduler.login("other").unwrap_err();
        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                action: "log in",
                state: "logged in",
            }
        );
        assert!(scheduler.confirm(Ok(confirmation())).is_err());
        assert!(matches!(scheduler.state(), SchedulerState::LoggedIn { .. }));
    }

    #[test]
    fn blank_token_cannot_log_in() {
        let mut scheduler = Scheduler::new(Madrid);
        assert!(scheduler.login("   ").is_err());
        assert_eq!(scheduler.state(), &SchedulerState::LoggedOut);
    }

    #[test]
    fn failed_submission_keeps_the_form_open() {
        let mut scheduler = browsing();
        scheduler.select_slot(ten_o_clock()).unwrap();

        let err = scheduler
            .confirm(Err(ClientError::Api {
                status: 500,
                error: "Failed to create event".to_string(),
                details: "Failed to save booking: database is locked".to_string(),
            }))
            .unwrap_err();
        assert_eq!(
            err,
            TransitionError::SubmissionFailed("Failed to save booking: database is locked".to_string())
        );
        assert!(matches!(scheduler.state(), SchedulerState::SlotSelected { .. }));

        scheduler.cancel().unwrap();
        assert!(matches!(
            scheduler.state(),
            SchedulerState::AvailabilityLoaded { .. }
        ));
    }

    #[test]
    fn submission_needs_the_profile() {
        let mut scheduler = Scheduler::new(Madrid);
        scheduler.login("tok").unwrap();
        scheduler.load_availability(availability(), monday()).unwrap();
        scheduler.select_slot(ten_o_clock()).unwrap();

        let err = scheduler.submission(BookingDetails::default()).unwrap_err();
        assert_eq!(err, TransitionError::MissingProfile);
    }

    #[test]
    fn days_outside_the_picker_are_rejected() {
        let mut scheduler = browsing();
        let next_monday = NaiveDate::from_ymd_opt(2025, 5, 12).unwrap();
        assert_eq!(
            scheduler.select_day(next_monday),
            Err(TransitionError::DayNotOffered(next_monday))
        );

        let tuesday = monday().succ_opt().unwrap();
        scheduler.select_day(tuesday).unwrap();
        assert!(scheduler.available_slots().is_empty());
        match screen(&scheduler) {
            Screen::Calendar {
                empty_message,
                days,
                ..
            } => {
                assert_eq!(empty_message, Some(NO_SLOTS_MESSAGE));
                assert!(days[1].selected);
            }
            other => panic!("unexpected screen: {:?}", other),
        }
    }

    #[test]
    fn clear_schedule_and_logout_reset() {
        let mut scheduler = browsing();
        scheduler.select_slot(ten_o_clock()).unwrap();

        scheduler.clear_schedule().unwrap();
        match scheduler.state() {
            SchedulerState::LoggedIn { session } => {
                assert_eq!(session.profile.as_ref(), Some(&profile()))
            }
            other => panic!("unexpected state: {:?}", other),
        }

        scheduler.logout();
        assert_eq!(scheduler.state(), &SchedulerState::LoggedOut);
        assert!(matches!(screen(&scheduler), Screen::Login { .. }));
    }
}
