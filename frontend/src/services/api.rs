use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    ApiError, AvailabilityResponse, BookingConfig, BookingRequest, BookingResult, CalendarEvent,
    CalendarOptions,
};

/// API client for the booking server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    config: BookingConfig,
}

impl ApiClient {
    /// An empty `api_base_url` talks to the page's own origin
    pub fn with_config(config: BookingConfig) -> Self {
        Self { config }
    }

    /// Options the calendar is built with
    pub fn calendar_options(&self) -> CalendarOptions {
        CalendarOptions::new(self.config.calendar_url())
    }

    /// Event feed shown on the calendar
    pub async fn get_calendar_events(
        &self,
        options: &CalendarOptions,
    ) -> Result<Vec<CalendarEvent>, ApiError> {
        log::debug!("GET {}", options.events_url);

        let response = Request::get(&options.events_url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::parse_ok(response).await
    }

    /// Free slots for an ISO date, in server order
    pub async fn get_availability(&self, date: &str) -> Result<AvailabilityResponse, ApiError> {
        let url = self.config.availability_url(date);
        log::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::parse_ok(response).await
    }

    /// Submit a booking. The server reports refusals in the body, so the
    /// body is read whatever the status code.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingResult, ApiError> {
        let url = self.config.booking_url();
        log::debug!("POST {} for {} at {}", url, request.date, request.time);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        booking_result_from(status, body)
    }

    async fn parse_ok<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if !response.ok() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Status { status, body });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Interpret a `POST /book` answer. Refusals come back as a normal
/// `BookingResult` body, possibly with an error status.
fn booking_result_from(status: u16, body: String) -> Result<BookingResult, ApiError> {
    match serde_json::from_str::<BookingResult>(&body) {
        Ok(result) => Ok(result),
        Err(_) if !(200..300).contains(&status) => Err(ApiError::Status { status, body }),
        Err(e) => Err(ApiError::Decode(e.to_string())),
    }
}
