//! # Booking Session
//!
//! The state machine behind the booking widget. It knows nothing about the
//! DOM or HTTP: the UI feeds it [`SessionEvent`]s and executes the
//! [`Effect`]s it hands back, then renders the new state through
//! [`crate::view::render`].
//!
//! ## Flow
//! `Idle → DateRejected | SlotsLoading → SlotsShown → FormOpen → Submitting
//! → Idle (booked) | SubmitFailed`
//!
//! Every availability fetch and every booking submission is tagged with a
//! [`RequestId`]. Only the answer to the request the session is still
//! waiting for changes the phase; anything older is dropped (availability)
//! or only reported to the user (bookings), so a slow answer for an earlier
//! click can never overwrite what the user is looking at now.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::dates::{is_past, is_weekend, parse_iso_date, to_iso_string};
use crate::error::ApiError;
use crate::{BookingRequest, BookingResult};

/// Shown when a request fails before the server could answer
pub const NETWORK_ERROR_MESSAGE: &str = "Couldn't reach the server, please retry.";

/// Tag attached to an availability fetch or a booking submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Why a clicked date cannot be booked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    PastDate,
    Weekend,
    InvalidDate,
}

impl Rejection {
    pub fn message(&self) -> &'static str {
        match self {
            Rejection::PastDate => "You can't book past dates.",
            Rejection::Weekend => "Bookings are only available Monday to Friday.",
            Rejection::InvalidDate => "That date could not be read.",
        }
    }
}

/// Values held by the booking form while it is open
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    /// ISO 8601 date format (YYYY-MM-DD)
    pub date: String,
    pub time: String,
}

impl BookingForm {
    fn for_slot(date: NaiveDate, time: &str) -> Self {
        Self {
            date: to_iso_string(date),
            time: time.to_string(),
            ..Self::default()
        }
    }

    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    /// Nothing selected; also the state after a successful booking
    #[default]
    Idle,
    DateRejected {
        /// The clicked string, as reported by the calendar
        date: String,
        reason: Rejection,
    },
    SlotsLoading {
        date: NaiveDate,
        request: RequestId,
    },
    /// The availability fetch failed in transit
    AvailabilityUnavailable { date: NaiveDate },
    /// Slots fetched; an empty list means no availability
    SlotsShown { date: NaiveDate, slots: Vec<String> },
    FormOpen {
        date: NaiveDate,
        slots: Vec<String>,
        form: BookingForm,
    },
    Submitting {
        date: NaiveDate,
        slots: Vec<String>,
        form: BookingForm,
        request: RequestId,
    },
    /// The server refused the booking or could not be reached; the form
    /// keeps its values so the user can retry
    SubmitFailed {
        date: NaiveDate,
        slots: Vec<String>,
        form: BookingForm,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A day cell was clicked; carries the calendar's ISO date string
    DateClicked(String),
    AvailabilityLoaded {
        request: RequestId,
        slots: Vec<String>,
    },
    AvailabilityFailed {
        request: RequestId,
        error: ApiError,
    },
    SlotClicked(String),
    NameEdited(String),
    EmailEdited(String),
    /// The form was submitted with these field values
    FormSubmitted(BookingRequest),
    BookingCompleted {
        request: RequestId,
        result: BookingResult,
    },
    BookingFailed {
        request: RequestId,
        error: ApiError,
    },
}

/// Side effects requested by a transition, executed by the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// `GET /availability/{date}`, answered with `AvailabilityLoaded` or
    /// `AvailabilityFailed` carrying the same request id
    FetchAvailability { request: RequestId, date: String },
    /// `POST /book`, answered with `BookingCompleted` or `BookingFailed`
    /// carrying the same request id
    SubmitBooking {
        request: RequestId,
        booking: BookingRequest,
    },
    /// Blocking notification the user has to acknowledge
    Notify(String),
    RefetchCalendarEvents,
}

/// The booking session owned by the controller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingSession {
    phase: Phase,
    last_request: u64,
}

impl BookingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The date currently under consideration, if it passed validation
    pub fn selected_date(&self) -> Option<NaiveDate> {
        match &self.phase {
            Phase::Idle | Phase::DateRejected { .. } => None,
            Phase::SlotsLoading { date, .. }
            | Phase::AvailabilityUnavailable { date }
            | Phase::SlotsShown { date, .. }
            | Phase::FormOpen { date, .. }
            | Phase::Submitting { date, .. }
            | Phase::SubmitFailed { date, .. } => Some(*date),
        }
    }

    pub fn form(&self) -> Option<&BookingForm> {
        match &self.phase {
            Phase::FormOpen { form, .. }
            | Phase::Submitting { form, .. }
            | Phase::SubmitFailed { form, .. } => Some(form),
            _ => None,
        }
    }

    /// The chosen (date, time) pair, marked in the slots panel
    pub fn selected_slot(&self) -> Option<(NaiveDate, &str)> {
        let date = self.selected_date()?;
        self.form().map(|form| (date, form.time.as_str()))
    }

    pub fn is_form_visible(&self) -> bool {
        self.form().is_some()
    }

    /// Id of the fetch or submission whose answer is still awaited
    pub fn pending_request(&self) -> Option<RequestId> {
        match self.phase {
            Phase::SlotsLoading { request, .. } | Phase::Submitting { request, .. } => {
                Some(request)
            }
            _ => None,
        }
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        RequestId(self.last_request)
    }

    /// Apply one event and return the effects the UI has to run
    pub fn update(&mut self, event: SessionEvent, today: NaiveDate) -> Vec<Effect> {
        match event {
            SessionEvent::DateClicked(date) => self.on_date_clicked(date, today),
            SessionEvent::AvailabilityLoaded { request, slots } => {
                self.on_availability_loaded(request, slots)
            }
            SessionEvent::AvailabilityFailed { request, error } => {
                self.on_availability_failed(request, error)
            }
            SessionEvent::SlotClicked(time) => self.on_slot_clicked(time),
            SessionEvent::NameEdited(name) => {
                self.edit_form(|form| form.name = name);
                Vec::new()
            }
            SessionEvent::EmailEdited(email) => {
                self.edit_form(|form| form.email = email);
                Vec::new()
            }
            SessionEvent::FormSubmitted(fields) => self.on_form_submitted(fields),
            SessionEvent::BookingCompleted { request, result } => {
                self.on_booking_completed(request, result)
            }
            SessionEvent::BookingFailed { request, error } => {
                self.on_booking_failed(request, error)
            }
        }
    }

    fn on_date_clicked(&mut self, date_str: String, today: NaiveDate) -> Vec<Effect> {
        let date = match parse_iso_date(&date_str) {
            Ok(date) => date,
            Err(err) => {
                warn!("Rejecting clicked date: {}", err);
                self.reject(date_str, Rejection::InvalidDate);
                return Vec::new();
            }
        };

        if is_past(date, today) {
            self.reject(date_str, Rejection::PastDate);
            return Vec::new();
        }
        if is_weekend(date) {
            self.reject(date_str, Rejection::Weekend);
            return Vec::new();
        }

        let request = self.next_request();
        debug!("Fetching availability for {} (request {})", date, request.0);
        self.phase = Phase::SlotsLoading { date, request };

        vec![Effect::FetchAvailability {
            request,
            date: to_iso_string(date),
        }]
    }

    fn reject(&mut self, date: String, reason: Rejection) {
        debug!("Date {} rejected: {:?}", date, reason);
        self.phase = Phase::DateRejected { date, reason };
    }

    fn on_availability_loaded(&mut self, request: RequestId, slots: Vec<String>) -> Vec<Effect> {
        if self.pending_request() != Some(request) {
            debug!("Discarding stale availability response {}", request.0);
            return Vec::new();
        }
        if let Phase::SlotsLoading { date, .. } = self.phase {
            info!("{} slot(s) available on {}", slots.len(), date);
            self.phase = Phase::SlotsShown { date, slots };
        }
        Vec::new()
    }

    fn on_availability_failed(&mut self, request: RequestId, error: ApiError) -> Vec<Effect> {
        if self.pending_request() != Some(request) {
            debug!("Ignoring failure of stale availability request {}: {}", request.0, error);
            return Vec::new();
        }
        match self.phase {
            Phase::SlotsLoading { date, .. } => {
                warn!("Availability fetch for {} failed: {}", date, error);
                self.phase = Phase::AvailabilityUnavailable { date };
                vec![Effect::Notify(NETWORK_ERROR_MESSAGE.to_string())]
            }
            _ => Vec::new(),
        }
    }

    fn on_slot_clicked(&mut self, time: String) -> Vec<Effect> {
        let phase = std::mem::take(&mut self.phase);
        self.phase = match phase {
            Phase::SlotsShown { date, slots } if slots.contains(&time) => {
                let form = BookingForm::for_slot(date, &time);
                Phase::FormOpen { date, slots, form }
            }
            Phase::FormOpen { date, slots, mut form } | Phase::SubmitFailed { date, slots, mut form }
                if slots.contains(&time) =>
            {
                // Re-selecting keeps whatever the user already typed
                form.date = to_iso_string(date);
                form.time = time;
                Phase::FormOpen { date, slots, form }
            }
            other => {
                warn!("Ignoring slot click for {} in {:?}", time, other);
                other
            }
        };
        Vec::new()
    }

    fn edit_form(&mut self, edit: impl FnOnce(&mut BookingForm)) {
        match &mut self.phase {
            Phase::FormOpen { form, .. } | Phase::SubmitFailed { form, .. } => edit(form),
            _ => debug!("Ignoring form edit while the form is not editable"),
        }
    }

    fn on_form_submitted(&mut self, fields: BookingRequest) -> Vec<Effect> {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            Phase::FormOpen { date, slots, .. } | Phase::SubmitFailed { date, slots, .. } => {
                let request = self.next_request();
                info!(
                    "Submitting booking for {} at {} (request {})",
                    fields.date, fields.time, request.0
                );
                let form = BookingForm {
                    name: fields.name.clone(),
                    email: fields.email.clone(),
                    date: fields.date.clone(),
                    time: fields.time.clone(),
                };
                self.phase = Phase::Submitting { date, slots, form, request };
                vec![Effect::SubmitBooking {
                    request,
                    booking: fields,
                }]
            }
            other => {
                warn!("Ignoring form submission in {:?}", other);
                self.phase = other;
                Vec::new()
            }
        }
    }

    /// Answers to an older submission are still shown to the user, but
    /// only the awaited submission moves the phase.
    fn on_booking_completed(&mut self, request: RequestId, result: BookingResult) -> Vec<Effect> {
        let mut effects = vec![Effect::Notify(result.message.clone())];
        let current = self.pending_request() == Some(request);

        if result.is_success() {
            info!("Booking confirmed (request {}): {}", request.0, result.message);
            if current {
                self.phase = Phase::Idle;
            }
            effects.push(Effect::RefetchCalendarEvents);
        } else {
            warn!(
                "Booking refused (request {}, {}): {}",
                request.0, result.status, result.message
            );
            if current {
                self.fail_submission();
            }
        }

        effects
    }

    fn on_booking_failed(&mut self, request: RequestId, error: ApiError) -> Vec<Effect> {
        warn!("Booking request {} failed: {}", request.0, error);
        if self.pending_request() == Some(request) {
            self.fail_submission();
        }
        vec![Effect::Notify(NETWORK_ERROR_MESSAGE.to_string())]
    }

    fn fail_submission(&mut self) {
        let phase = std::mem::take(&mut self.phase);
        self.phase = match phase {
            Phase::Submitting { date, slots, form, .. } => {
                Phase::SubmitFailed { date, slots, form }
            }
            other => other,
        };
    }
}
