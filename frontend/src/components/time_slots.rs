use shared::view::{LOADING_MESSAGE, NO_AVAILABILITY};
use shared::SlotsPanel;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TimeSlotsProps {
    pub panel: SlotsPanel,
    pub on_slot_click: Callback<String>,
}

#[function_component(TimeSlots)]
pub fn time_slots(props: &TimeSlotsProps) -> Html {
    let body = match &props.panel {
        SlotsPanel::Empty => return html! { <div id="timeSlots" class="time-slots"></div> },
        SlotsPanel::Rejected { message, .. } | SlotsPanel::Unavailable { message, .. } => {
            html! { <p class="slots-message">{message.clone()}</p> }
        }
        SlotsPanel::Loading { .. } => html! { <p class="slots-message">{LOADING_MESSAGE}</p> },
        SlotsPanel::NoAvailability { .. } => html! { <p class="slots-message">{NO_AVAILABILITY}</p> },
        SlotsPanel::Slots { buttons, .. } => html! {
            <>
                {for buttons.iter().map(|button| {
                    let onclick = {
                        let on_slot_click = props.on_slot_click.clone();
                        let time = button.time.clone();
                        Callback::from(move |_: MouseEvent| on_slot_click.emit(time.clone()))
                    };
                    let class = if button.selected { "slot-btn selected" } else { "slot-btn" };
                    html! {
                        <button type="button" {class} {onclick}>{button.time.clone()}</button>
                    }
                })}
            </>
        },
    };

    html! {
        <div id="timeSlots" class="time-slots">
            <h3>{props.panel.heading().unwrap_or_default()}</h3>
            {body}
        </div>
    }
}
