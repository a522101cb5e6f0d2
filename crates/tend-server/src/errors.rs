//! Mapping of store errors onto HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tend_core::{ErrorBody, TendError};

/// Error returned by every handler.
#[derive(Debug)]
pub struct ApiError(TendError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            TendError::InvalidInput { .. } | TendError::Serialization { .. } => {
                StatusCode::BAD_REQUEST
            }
            TendError::RoutineNotFound { .. } | TendError::StepNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TendError> for ApiError {
    fn from(error: TendError) -> Self {
        Self(error)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(TendError::invalid_input("body").with_reason(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Storage details stay in the log
        let message = if status.is_server_error() {
            log::error!("Request failed: {}", self.0);
            "Internal server error".to_string()
        } else {
            log::debug!("Request rejected: {}", self.0);
            self.0.to_string()
        };

        let body = ErrorBody {
            error: self.0.code().to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let invalid = ApiError::from(TendError::invalid_input("title").with_reason("required"));
        let missing = ApiError::from(TendError::StepNotFound {
            routine_id: "r".into(),
            step_id: "s".into(),
        });
        let storage = ApiError::from(TendError::Configuration {
            message: "Task join error".into(),
        });

        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
