use shared::calendar::CalendarDayType;
use shared::dates::month_name;
use shared::{CalendarDay, CalendarMonth};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingCalendarProps {
    pub calendar: CalendarMonth,
    pub on_prev_month: Callback<MouseEvent>,
    pub on_next_month: Callback<MouseEvent>,
    pub on_today: Callback<MouseEvent>,
    /// Receives the clicked day as `YYYY-MM-DD`
    pub on_date_click: Callback<String>,
}

/// Month grid with muted past and weekend days. Bookability is decided by
/// the session; every month day reports its clicks.
#[function_component(BookingCalendar)]
pub fn booking_calendar(props: &BookingCalendarProps) -> Html {
    let calendar = &props.calendar;

    html! {
        <div class="calendar">
            <div class="calendar-toolbar">
                <button type="button" class="btn nav-btn" onclick={props.on_prev_month.clone()}>{"‹"}</button>
                <button type="button" class="btn nav-btn" onclick={props.on_today.clone()}>{"Today"}</button>
                <button type="button" class="btn nav-btn" onclick={props.on_next_month.clone()}>{"›"}</button>
                <h2 class="calendar-title">
                    {format!("{} {}", month_name(calendar.month), calendar.year)}
                </h2>
            </div>
            <div class="calendar-weekdays">
                <div class="weekday">{"Sun"}</div>
                <div class="weekday">{"Mon"}</div>
                <div class="weekday">{"Tue"}</div>
                <div class="weekday">{"Wed"}</div>
                <div class="weekday">{"Thu"}</div>
                <div class="weekday">{"Fri"}</div>
                <div class="weekday">{"Sat"}</div>
            </div>
            <div class="calendar-grid">
                {for calendar.days.iter().map(|day| day_cell(day, &props.on_date_click))}
            </div>
        </div>
    }
}

fn day_cell(day: &CalendarDay, on_date_click: &Callback<String>) -> Html {
    let date = match (day.day_type, day.date_string()) {
        (CalendarDayType::MonthDay, Some(date)) => date,
        _ => return html! { <div class="calendar-day empty"></div> },
    };

    let onclick = {
        let on_date_click = on_date_click.clone();
        let date = date.clone();
        Callback::from(move |_: MouseEvent| on_date_click.emit(date.clone()))
    };

    html! {
        <div class="calendar-day" data-date={date} style={day.style.inline_css()} {onclick}>
            <div class="day-number">{day.day}</div>
            <div class="day-events">
                {for day.events.iter().map(|event| {
                    let style = event
                        .color
                        .as_ref()
                        .map(|color| format!("background-color: {};", color))
                        .unwrap_or_default();
                    html! {
                        <div class="event-chip" {style} title={event.title.clone()}>
                            {event.title.clone()}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}
