//! Mapping of service failures onto JSON error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use planboard_core::ServiceError;
use serde::Serialize;
use std::fmt::{Display, Formatter};

pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const INVALID_QUERY: &str = "Invalid query string";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// Error body shared by every route: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Handler failure with its HTTP status.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn invalid_body() -> Self {
        Self::BadRequest(INVALID_REQUEST_BODY.to_string())
    }

    pub fn invalid_query() -> Self {
        Self::BadRequest(INVALID_QUERY.to_string())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) | Self::Internal(message) => {
                f.write_str(message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ServiceError> for ApiError {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(message) => Self::BadRequest(message),
            ServiceError::NotFound(message) => Self::NotFound(message),
            ServiceError::Repo(err) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            // Storage details stay in the log.
            Self::Internal(details) => {
                error!("event=request module=http status=error error={details}");
                INTERNAL_SERVER_ERROR.to_string()
            }
            Self::BadRequest(message) | Self::NotFound(message) => message,
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, INTERNAL_SERVER_ERROR};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use http_body_util::BodyExt;
    use planboard_core::{RepoError, ServiceError};
    use serde_json::{json, Value};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn repository_failures_become_opaque_500s() {
        let err = ApiError::from(ServiceError::Repo(RepoError::InvalidData(
            "undecodable goal body for id `7` in records.body".to_string(),
        )));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": INTERNAL_SERVER_ERROR }));
    }

    #[tokio::test]
    async fn caller_mistakes_keep_their_message() {
        let (status, body) =
            render(ServiceError::Validation("Title is required".to_string()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Title is required" }));

        let (status, body) =
            render(ServiceError::NotFound("Goal not found".to_string()).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Goal not found" }));
    }
}
