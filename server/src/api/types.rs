//! Shared API types
//!
//! Error responses are plain text so spreadsheet cells show the message
//! verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::EffortError;

/// Standard API error response
#[derive(Debug)]
pub enum ApiError {
    BadRequest { message: String },
    Internal { message: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<EffortError> for ApiError {
    fn from(e: EffortError) -> Self {
        if e.is_client_error() {
            tracing::debug!(error = %e, "Rejected effort request");
            Self::bad_request(e.to_string())
        } else {
            tracing::error!(error = %e, "Effort lookup failed");
            Self::internal(e.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                format!("Bad request: {}", message),
            )
                .into_response(),
            Self::Internal { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", message),
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PeriodError, SelectorError, TogglError};

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_map_to_400() {
        let response = ApiError::from(EffortError::from(SelectorError::Ambiguous)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Bad request: task and project both specified"
        );

        let response = ApiError::from(EffortError::from(PeriodError::Missing)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_string(response).await,
            "Bad request: no month or sprint specified"
        );
    }

    #[tokio::test]
    async fn test_upstream_errors_map_to_500() {
        let err = EffortError::from(TogglError::Status {
            status: 503,
            body: "maintenance".to_string(),
        });
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let content_type = response.headers()[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert!(body_string(response).await.contains("503"));
    }
}
