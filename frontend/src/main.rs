use shared::BookingConfig;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::booking_form::BookingFormPanel;
use components::calendar::BookingCalendar;
use components::time_slots::TimeSlots;
use hooks::use_booking_session::use_booking_session;
use hooks::use_calendar::use_calendar;
use services::api::ApiClient;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: BookingConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let api_client = use_memo(props.config.clone(), |config| {
        ApiClient::with_config(config.clone())
    });

    let calendar = use_calendar(&api_client);
    let booking = use_booking_session(&api_client, calendar.actions.refetch_events.clone());

    html! {
        <div class="booking-widget">
            <section class="calendar-section">
                <BookingCalendar
                    calendar={calendar.state.calendar.clone()}
                    on_prev_month={calendar.actions.prev_month.clone()}
                    on_next_month={calendar.actions.next_month.clone()}
                    on_today={calendar.actions.go_to_today.clone()}
                    on_date_click={booking.actions.on_date_click.clone()}
                />
            </section>

            <section class="booking-section">
                <TimeSlots
                    panel={booking.view.slots.clone()}
                    on_slot_click={booking.actions.on_slot_click.clone()}
                />

                {if let Some(form) = booking.view.form.clone() {
                    html! {
                        <BookingFormPanel
                            {form}
                            on_name_change={booking.actions.on_name_change.clone()}
                            on_email_change={booking.actions.on_email_change.clone()}
                            on_submit={booking.actions.on_submit.clone()}
                        />
                    }
                } else { html! {} }}
            </section>
        </div>
    }
}

fn main() {
    let config = BookingConfig::default();
    services::logging::init(&config);
    log::info!("Starting booking widget against '{}'", config.calendar_url());

    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
