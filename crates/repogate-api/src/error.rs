use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use repogate_core::RepoGateError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    RepoGate(#[from] RepoGateError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RepoGate(err) => match err {
                RepoGateError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                RepoGateError::NotFound(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), "request failed: {}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use repogate_core::PublishStep;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (
                ApiError::from(RepoGateError::InvalidInput("Missing file path".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(RepoGateError::NotFound("File not found".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(RepoGateError::Sync("clone failed".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::from(RepoGateError::Publish {
                    step: PublishStep::Push,
                    message: "rejected".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::BadRequest("Missing search term".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn client_messages_are_passed_through_verbatim() {
        let err = ApiError::from(RepoGateError::NotFound("File not found".into()));
        assert_eq!(err.to_string(), "File not found");
    }
}
