//! Projection of a [`BookingSession`] into what the page should show.
//!
//! The frontend components render these values as-is, so every display
//! string the user sees for the slots panel and the form is decided here.

use crate::dates::{format_display_date, to_iso_string};
use crate::session::{BookingForm, BookingSession, Phase, NETWORK_ERROR_MESSAGE};

pub const NO_AVAILABILITY: &str = "No availability";
pub const LOADING_MESSAGE: &str = "Loading available times...";

/// Header line above the slot buttons
pub fn slots_heading(iso_date: &str) -> String {
    format!("Available Times for {}", format_display_date(iso_date))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotButton {
    pub time: String,
    /// The slot the open form is filled in for
    pub selected: bool,
}

/// Contents of the slots panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotsPanel {
    Empty,
    /// A clicked date failed validation
    Rejected { heading: String, message: String },
    Loading { heading: String },
    Unavailable { heading: String, message: String },
    NoAvailability { heading: String },
    Slots {
        heading: String,
        buttons: Vec<SlotButton>,
    },
}

impl SlotsPanel {
    pub fn heading(&self) -> Option<&str> {
        match self {
            SlotsPanel::Empty => None,
            SlotsPanel::Rejected { heading, .. }
            | SlotsPanel::Loading { heading }
            | SlotsPanel::Unavailable { heading, .. }
            | SlotsPanel::NoAvailability { heading }
            | SlotsPanel::Slots { heading, .. } => Some(heading),
        }
    }

    pub fn buttons(&self) -> &[SlotButton] {
        match self {
            SlotsPanel::Slots { buttons, .. } => buttons,
            _ => &[],
        }
    }
}

/// The booking form as it should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub name: String,
    pub email: String,
    /// Hidden ISO date field
    pub date: String,
    /// Hidden time field
    pub time: String,
    /// Submit is disabled while a booking is in flight
    pub submitting: bool,
}

impl FormView {
    fn from_form(form: &BookingForm, submitting: bool) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            date: form.date.clone(),
            time: form.time.clone(),
            submitting,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub slots: SlotsPanel,
    /// `None` while the form is hidden
    pub form: Option<FormView>,
}

pub fn render(session: &BookingSession) -> SessionView {
    let slots = match session.phase() {
        Phase::Idle => SlotsPanel::Empty,
        Phase::DateRejected { date, reason } => SlotsPanel::Rejected {
            heading: date.clone(),
            message: reason.message().to_string(),
        },
        Phase::SlotsLoading { date, .. } => SlotsPanel::Loading {
            heading: slots_heading(&to_iso_string(*date)),
        },
        Phase::AvailabilityUnavailable { date } => SlotsPanel::Unavailable {
            heading: slots_heading(&to_iso_string(*date)),
            message: NETWORK_ERROR_MESSAGE.to_string(),
        },
        Phase::SlotsShown { date, slots } if slots.is_empty() => SlotsPanel::NoAvailability {
            heading: slots_heading(&to_iso_string(*date)),
        },
        Phase::SlotsShown { date, slots }
        | Phase::FormOpen { date, slots, .. }
        | Phase::Submitting { date, slots, .. }
        | Phase::SubmitFailed { date, slots, .. } => {
            let selected = session.selected_slot().map(|(_, time)| time);
            slot_buttons(*date, slots, selected)
        }
    };

    let form = match session.phase() {
        Phase::FormOpen { form, .. } | Phase::SubmitFailed { form, .. } => {
            Some(FormView::from_form(form, false))
        }
        Phase::Submitting { form, .. } => Some(FormView::from_form(form, true)),
        _ => None,
    };

    SessionView { slots, form }
}

fn slot_buttons(date: chrono::NaiveDate, slots: &[String], selected: Option<&str>) -> SlotsPanel {
    SlotsPanel::Slots {
        heading: slots_heading(&to_iso_string(date)),
        buttons: slots
            .iter()
            .map(|time| SlotButton {
                time: time.clone(),
                selected: selected == Some(time.as_str()),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Effect, RequestId, SessionEvent};
    use crate::{BookingRequest, BookingResult};
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 18).unwrap()
    }

    fn send(session: &mut BookingSession, event: SessionEvent) -> Vec<Effect> {
        session.update(event, today())
    }

    fn click(session: &mut BookingSession, date: &str) -> RequestId {
        match send(session, SessionEvent::DateClicked(date.to_string())).as_slice() {
            [Effect::FetchAvailability { request, .. }] => *request,
            other => panic!("expected a fetch, got {:?}", other),
        }
    }

    fn load(session: &mut BookingSession, request: RequestId, times: &[&str]) {
        send(
            session,
            SessionEvent::AvailabilityLoaded {
                request,
                slots: times.iter().map(|t| t.to_string()).collect(),
            },
        );
    }

    #[test]
    fn test_idle_shows_nothing() {
        let view = render(&BookingSession::new());
        assert_eq!(view.slots, SlotsPanel::Empty);
        assert_eq!(view.form, None);
    }

    #[test]
    fn test_rejected_date_shows_raw_date_and_message() {
        let mut session = BookingSession::new();
        send(&mut session, SessionEvent::DateClicked("2025-06-17".to_string()));

        let view = render(&session);
        assert_eq!(
            view.slots,
            SlotsPanel::Rejected {
                heading: "2025-06-17".to_string(),
                message: "You can't book past dates.".to_string(),
            }
        );
        assert!(view.form.is_none());

        send(&mut session, SessionEvent::DateClicked("2099-06-14".to_string()));
        match render(&session).slots {
            SlotsPanel::Rejected { message, .. } => {
                assert_eq!(message, "Bookings are only available Monday to Friday.")
            }
            other => panic!("unexpected panel {:?}", other),
        }
    }

    #[test]
    fn test_loading_shows_heading() {
        let mut session = BookingSession::new();
        click(&mut session, "2099-06-10");
        let view = render(&session);
        assert_eq!(
            view.slots,
            SlotsPanel::Loading {
                heading: "Available Times for 10/06/2099".to_string()
            }
        );
        assert!(view.slots.buttons().is_empty());
    }

    #[test]
    fn test_empty_availability_shows_no_availability() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        load(&mut session, request, &[]);

        let view = render(&session);
        assert_eq!(
            view.slots,
            SlotsPanel::NoAvailability {
                heading: "Available Times for 10/06/2099".to_string()
            }
        );
        assert!(view.slots.buttons().is_empty());
        assert!(view.form.is_none());
    }

    #[test]
    fn test_two_slots_render_two_buttons_in_order() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        load(&mut session, request, &["09:00", "10:30"]);

        let view = render(&session);
        assert_eq!(view.slots.heading(), Some("Available Times for 10/06/2099"));
        let times: Vec<&str> = view.slots.buttons().iter().map(|b| b.time.as_str()).collect();
        assert_eq!(times, vec!["09:00", "10:30"]);
        assert!(view.slots.buttons().iter().all(|b| !b.selected));

        // Each button opens the form with its own time and the clicked date
        for time in ["09:00", "10:30"] {
            send(&mut session, SessionEvent::SlotClicked(time.to_string()));
            let form = render(&session).form.expect("form visible");
            assert_eq!(form.date, "2099-06-10");
            assert_eq!(form.time, time);
        }
    }

    #[test]
    fn test_selected_slot_is_marked() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        load(&mut session, request, &["09:00", "10:30"]);
        send(&mut session, SessionEvent::SlotClicked("10:30".to_string()));

        let view = render(&session);
        let selected: Vec<&str> = view
            .slots
            .buttons()
            .iter()
            .filter(|b| b.selected)
            .map(|b| b.time.as_str())
            .collect();
        assert_eq!(selected, vec!["10:30"]);
    }

    #[test]
    fn test_end_to_end_success() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        load(&mut session, request, &["09:00"]);
        send(&mut session, SessionEvent::SlotClicked("09:00".to_string()));

        let form = render(&session).form.unwrap();
        assert_eq!((form.date.as_str(), form.time.as_str()), ("2099-06-10", "09:00"));

        let effects = send(
            &mut session,
            SessionEvent::FormSubmitted(BookingRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                date: form.date,
                time: form.time,
            }),
        );
        let request = match effects.as_slice() {
            [Effect::SubmitBooking { request, .. }] => *request,
            other => panic!("expected a submission, got {:?}", other),
        };
        assert!(render(&session).form.unwrap().submitting);

        let effects = send(
            &mut session,
            SessionEvent::BookingCompleted {
                request,
                result: BookingResult {
                    status: "success".to_string(),
                    message: "Booked!".to_string(),
                },
            },
        );
        assert!(effects.contains(&Effect::Notify("Booked!".to_string())));
        assert!(effects.contains(&Effect::RefetchCalendarEvents));

        let view = render(&session);
        assert_eq!(view.slots, SlotsPanel::Empty);
        assert_eq!(view.form, None);
    }

    #[test]
    fn test_end_to_end_refusal_keeps_form() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        load(&mut session, request, &["09:00"]);
        send(&mut session, SessionEvent::SlotClicked("09:00".to_string()));
        send(&mut session, SessionEvent::NameEdited("Ada".to_string()));
        send(&mut session, SessionEvent::EmailEdited("ada@example.com".to_string()));

        let form = render(&session).form.unwrap();
        let request = match send(
            &mut session,
            SessionEvent::FormSubmitted(BookingRequest {
                name: form.name,
                email: form.email,
                date: form.date,
                time: form.time,
            }),
        )
        .as_slice()
        {
            [Effect::SubmitBooking { request, .. }] => *request,
            other => panic!("expected a submission, got {:?}", other),
        };
        let effects = send(
            &mut session,
            SessionEvent::BookingCompleted {
                request,
                result: BookingResult {
                    status: "error".to_string(),
                    message: "Slot taken".to_string(),
                },
            },
        );
        assert_eq!(effects, vec![Effect::Notify("Slot taken".to_string())]);

        let form = render(&session).form.expect("form stays visible");
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert_eq!(form.date, "2099-06-10");
        assert_eq!(form.time, "09:00");
        assert!(!form.submitting);
    }

    #[test]
    fn test_unavailable_shows_retry_message() {
        let mut session = BookingSession::new();
        let request = click(&mut session, "2099-06-10");
        send(
            &mut session,
            SessionEvent::AvailabilityFailed {
                request,
                error: crate::ApiError::Network("offline".to_string()),
            },
        );

        assert_eq!(
            render(&session).slots,
            SlotsPanel::Unavailable {
                heading: "Available Times for 10/06/2099".to_string(),
                message: NETWORK_ERROR_MESSAGE.to_string(),
            }
        );
    }
}
