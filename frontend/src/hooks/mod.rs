pub mod use_booking_session;
pub mod use_calendar;
