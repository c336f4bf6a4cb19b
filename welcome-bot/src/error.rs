//! Error types for webhook handling and outbound API calls.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failure talking to the Pachca REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Pachca API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Rejection or failure while handling an inbound webhook.
///
/// Each variant maps to one HTTP status with a short plain-text body.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("signature header is missing")]
    MissingSignature,

    #[error("signature does not match request body")]
    InvalidSignature,

    #[error("webhook is {age_secs}s old")]
    Stale { age_secs: u64 },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("downstream call failed: {0}")]
    Downstream(#[from] ApiError),
}

impl WebhookError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebhookError::MissingSignature => StatusCode::BAD_REQUEST,
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::Stale { .. } => StatusCode::REQUEST_TIMEOUT,
            WebhookError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> &'static str {
        match self {
            WebhookError::MissingSignature => "No signature",
            WebhookError::InvalidSignature => "Invalid signature",
            WebhookError::Stale { .. } => "Webhook too old",
            WebhookError::MalformedPayload(_) => "Invalid payload",
            WebhookError::Downstream(_) => "Internal error",
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(WebhookError::MissingSignature.status(), StatusCode::BAD_REQUEST);
        assert_eq!(WebhookError::InvalidSignature.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            WebhookError::Stale { age_secs: 61 }.status(),
            StatusCode::REQUEST_TIMEOUT
        );
        assert_eq!(
            WebhookError::MalformedPayload("eof".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            WebhookError::Downstream(ApiError::Status {
                status: 502,
                body: String::new()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_downstream_message_keeps_detail() {
        let err = WebhookError::from(ApiError::Status {
            status: 422,
            body: "entity not found".into(),
        });
        assert!(err.to_string().contains("entity not found"));
    }
}
