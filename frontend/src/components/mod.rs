pub mod booking_form;
pub mod calendar;
pub mod time_slots;
