use shared::{BookingRequest, FormView};
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingFormProps {
    pub form: FormView,

    pub on_name_change: Callback<String>,
    pub on_email_change: Callback<String>,
    pub on_submit: Callback<BookingRequest>,
}

/// Name and email inputs for the chosen slot. Date and time travel in
/// hidden fields.
#[function_component(BookingFormPanel)]
pub fn booking_form_panel(props: &BookingFormProps) -> Html {
    let form = &props.form;

    let on_name_input = {
        let on_name_change = props.on_name_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_name_change.emit(input.value());
        })
    };

    let on_email_input = {
        let on_email_change = props.on_email_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_email_change.emit(input.value());
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        let request = BookingRequest {
            name: form.name.clone(),
            email: form.email.clone(),
            date: form.date.clone(),
            time: form.time.clone(),
        };
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(request.clone());
        })
    };

    html! {
        <form id="bookingForm" class="booking-form" {onsubmit}>
            <div class="form-group">
                <label for="name">{"Name"}</label>
                <input
                    type="text"
                    id="name"
                    name="name"
                    required=true
                    value={form.name.clone()}
                    oninput={on_name_input}
                    disabled={form.submitting}
                />
            </div>

            <div class="form-group">
                <label for="email">{"Email"}</label>
                <input
                    type="email"
                    id="email"
                    name="email"
                    required=true
                    value={form.email.clone()}
                    oninput={on_email_input}
                    disabled={form.submitting}
                />
            </div>

            <input type="hidden" name="date" value={form.date.clone()} />
            <input type="hidden" name="time" value={form.time.clone()} />

            <button type="submit" class="btn btn-primary" disabled={form.submitting}>
                {if form.submitting { "Booking..." } else { "Book" }}
            </button>
        </form>
    }
}
