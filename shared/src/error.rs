use thiserror::Error;

/// Failure while talking to the booking server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// The request body could not be serialized
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidFormat(String),
}
