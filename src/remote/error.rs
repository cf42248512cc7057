//! Error conversion for ticket service responses.

use std::fmt;

use crate::error::DeskError;

const MAX_BODY_CHARS: usize = 200;

/// A failed ticket service call, kept structured until it is logged.
#[derive(Debug)]
pub struct ApiError {
    /// HTTP status code, if a response arrived
    pub status: Option<reqwest::StatusCode>,
    /// Endpoint path the request was sent to
    pub endpoint: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: None,
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Build an error for a non-success response, keeping a short prefix of the body
    pub fn with_status(endpoint: impl Into<String>, status: reqwest::StatusCode, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        } else {
            body.chars().take(MAX_BODY_CHARS).collect()
        };

        Self {
            status: Some(status),
            endpoint: endpoint.into(),
            message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "{} returned HTTP {}: {}",
                self.endpoint,
                status.as_u16(),
                self.message
            ),
            None => write!(f, "{}: {}", self.endpoint, self.message),
        }
    }
}

impl From<ApiError> for DeskError {
    fn from(error: ApiError) -> Self {
        DeskError::NetworkFailure(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = ApiError::with_status("api/tickets/9", reqwest::StatusCode::NOT_FOUND, "");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "api/tickets/9 returned HTTP 404: Not Found"
        );
    }

    #[test]
    fn test_body_is_truncated() {
        let body = "x".repeat(500);
        let err = ApiError::with_status("api/tickets", reqwest::StatusCode::BAD_GATEWAY, &body);
        assert_eq!(err.message.len(), MAX_BODY_CHARS);
    }

    #[test]
    fn test_converts_to_network_failure() {
        let err: DeskError = ApiError::new("api/tickets", "connection refused").into();
        assert!(err.is_network());
    }
}
