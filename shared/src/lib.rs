use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod dates;
pub mod error;
pub mod session;
pub mod view;

pub use calendar::{CalendarDay, CalendarDayType, CalendarMonth, CalendarOptions, CellStyle};
pub use dates::{format_display_date, parse_iso_date};
pub use error::{ApiError, DateError};
pub use session::{BookingSession, Effect, Phase, Rejection, RequestId, SessionEvent};
pub use view::{FormView, SessionView, SlotsPanel};

/// Status value the booking endpoint uses to report a confirmed booking
pub const STATUS_SUCCESS: &str = "success";

/// Response of `GET /availability/{date}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Free time slots in server order (e.g. "09:00")
    pub available: Vec<String>,
    /// Echo of the requested date, sent by some servers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Body of `POST /book`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub name: String,
    pub email: String,
    /// ISO 8601 date format (YYYY-MM-DD)
    pub date: String,
    pub time: String,
}

/// Server verdict for a booking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingResult {
    pub status: String,
    pub message: String,
}

impl BookingResult {
    /// Only the exact string "success" counts as a confirmed booking
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// One entry of the `GET /calendar` event feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub title: String,
    /// ISO 8601 date format (YYYY-MM-DD)
    pub start: String,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
}

/// Configuration for the booking widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Prefix for every request; empty means same origin
    pub api_base_url: String,
    pub calendar_path: String,
    pub availability_path: String,
    pub booking_path: String,
    pub enable_debug_logging: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            calendar_path: "/calendar".to_string(),
            availability_path: "/availability".to_string(),
            booking_path: "/book".to_string(),
            enable_debug_logging: false,
        }
    }
}

impl BookingConfig {
    pub fn calendar_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.calendar_path)
    }

    pub fn availability_url(&self, date: &str) -> String {
        format!("{}{}/{}", self.api_base_url, self.availability_path, date)
    }

    pub fn booking_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.booking_path)
    }
}
