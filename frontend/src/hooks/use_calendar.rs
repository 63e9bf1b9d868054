use shared::calendar::{generate_calendar_month, next_month, previous_month};
use shared::{CalendarEvent, CalendarMonth};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;

#[derive(Clone, PartialEq)]
pub struct CalendarState {
    pub calendar: CalendarMonth,
}

pub struct UseCalendarResult {
    pub state: CalendarState,
    pub actions: UseCalendarActions,
}

#[derive(Clone)]
pub struct UseCalendarActions {
    pub prev_month: Callback<MouseEvent>,
    pub next_month: Callback<MouseEvent>,
    pub go_to_today: Callback<MouseEvent>,
    /// Reload the `/calendar` event feed
    pub refetch_events: Callback<()>,
}

/// Month grid state plus the event feed behind it. The feed is loaded once
/// on mount and again whenever `refetch_events` is emitted.
#[hook]
pub fn use_calendar(api_client: &ApiClient) -> UseCalendarResult {
    let visible_month = use_state(date_utils::current_month_year);
    let events = use_state(Vec::<CalendarEvent>::new);

    let refetch_events = {
        let api_client = api_client.clone();
        let options = api_client.calendar_options();
        let events = events.clone();

        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let options = options.clone();
            let events = events.clone();

            spawn_local(async move {
                match api_client.get_calendar_events(&options).await {
                    Ok(feed) => {
                        log::debug!("Loaded {} calendar event(s)", feed.len());
                        events.set(feed);
                    }
                    Err(e) => {
                        // The grid stays usable without event chips
                        log::error!("Failed to fetch calendar events: {}", e);
                    }
                }
            });
        })
    };

    // Initial draw
    {
        let refetch_events = refetch_events.clone();
        use_effect_with((), move |_| {
            refetch_events.emit(());
            || ()
        });
    }

    let prev_month = {
        let visible_month = visible_month.clone();
        use_callback(*visible_month, move |_: MouseEvent, &(month, year)| {
            visible_month.set(previous_month(month, year));
        })
    };

    let next_month = {
        let visible_month = visible_month.clone();
        use_callback(*visible_month, move |_: MouseEvent, &(month, year)| {
            visible_month.set(next_month(month, year));
        })
    };

    let go_to_today = {
        let visible_month = visible_month.clone();
        use_callback((), move |_: MouseEvent, _| {
            visible_month.set(date_utils::current_month_year());
        })
    };

    let (current_month, current_year) = *visible_month;
    let calendar = generate_calendar_month(
        current_month,
        current_year,
        date_utils::today(),
        &events,
    );

    let state = CalendarState { calendar };

    let actions = UseCalendarActions {
        prev_month,
        next_month,
        go_to_today,
        refetch_events,
    };

    UseCalendarResult { state, actions }
}
