use std::cell::RefCell;
use std::rc::Rc;

use shared::view::render;
use shared::{BookingRequest, BookingSession, Effect, SessionEvent, SessionView};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;

pub struct UseBookingSessionResult {
    pub view: SessionView,
    pub actions: BookingSessionActions,
}

#[derive(Clone)]
pub struct BookingSessionActions {
    /// Fed by the calendar with the clicked ISO date
    pub on_date_click: Callback<String>,
    pub on_slot_click: Callback<String>,
    pub on_name_change: Callback<String>,
    pub on_email_change: Callback<String>,
    pub on_submit: Callback<BookingRequest>,
}

/// Feeds events into the session and runs the effects it returns
#[derive(Clone)]
struct Dispatcher {
    session: Rc<RefCell<BookingSession>>,
    rerender: UseForceUpdateHandle,
    api_client: ApiClient,
    refetch_events: Callback<()>,
}

impl Dispatcher {
    fn send(&self, event: SessionEvent) {
        let effects = self.session.borrow_mut().update(event, date_utils::today());
        // Queued, not painted: a Notify alert below shows before the new state
        self.rerender.force_update();

        for effect in effects {
            self.run(effect);
        }
    }

    fn run(&self, effect: Effect) {
        match effect {
            Effect::FetchAvailability { request, date } => {
                let dispatcher = self.clone();
                spawn_local(async move {
                    let event = match dispatcher.api_client.get_availability(&date).await {
                        Ok(response) => SessionEvent::AvailabilityLoaded {
                            request,
                            slots: response.available,
                        },
                        Err(error) => SessionEvent::AvailabilityFailed { request, error },
                    };
                    dispatcher.send(event);
                });
            }
            Effect::SubmitBooking { request, booking } => {
                let dispatcher = self.clone();
                spawn_local(async move {
                    let event = match dispatcher.api_client.book(&booking).await {
                        Ok(result) => SessionEvent::BookingCompleted { request, result },
                        Err(error) => SessionEvent::BookingFailed { request, error },
                    };
                    dispatcher.send(event);
                });
            }
            Effect::Notify(message) => gloo::dialogs::alert(&message),
            Effect::RefetchCalendarEvents => self.refetch_events.emit(()),
        }
    }

    fn callback<T, F>(&self, to_event: F) -> Callback<T>
    where
        T: 'static,
        F: Fn(T) -> SessionEvent + 'static,
    {
        let dispatcher = self.clone();
        Callback::from(move |value: T| dispatcher.send(to_event(value)))
    }
}

#[hook]
pub fn use_booking_session(
    api_client: &ApiClient,
    refetch_events: Callback<()>,
) -> UseBookingSessionResult {
    let session = use_mut_ref(BookingSession::new);
    let rerender = use_force_update();

    let dispatcher = Dispatcher {
        session: session.clone(),
        rerender,
        api_client: api_client.clone(),
        refetch_events,
    };

    let actions = BookingSessionActions {
        on_date_click: dispatcher.callback(SessionEvent::DateClicked),
        on_slot_click: dispatcher.callback(SessionEvent::SlotClicked),
        on_name_change: dispatcher.callback(SessionEvent::NameEdited),
        on_email_change: dispatcher.callback(SessionEvent::EmailEdited),
        on_submit: dispatcher.callback(SessionEvent::FormSubmitted),
    };

    let view = render(&session.borrow());

    UseBookingSessionResult { view, actions }
}
