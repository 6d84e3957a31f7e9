//! Gateway error types.

/// Errors from the bookings API.
///
/// Every variant is a network failure as far as the views are concerned:
/// callers log it and carry on with no data.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-2xx status
    #[error("response status {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not the expected JSON; `body` holds its first characters
    #[error("JSON parse error: {message} (body: {body:?})")]
    Decode { message: String, body: String },

    /// Fixture data could not be loaded
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl GatewayError {
    /// Whether the API reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::Status { status: 404, .. })
    }
}
