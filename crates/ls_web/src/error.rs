use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use crate::callable::CallableError;

/// Failure of a callable operation.
///
/// The wrapped error is logged but never sent to the client; the response
/// only carries the operation's fixed message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to create article")]
    CreateArticle(#[source] ls_core::Error),

    #[error("Failed to regenerate content")]
    RegenerateContent(#[source] ls_core::Error),

    #[error("Failed to analyze text")]
    AnalyzeText(#[source] ls_core::Error),
}

impl ApiError {
    pub fn operation(&self) -> &'static str {
        match self {
            ApiError::CreateArticle(_) => "createArticle",
            ApiError::RegenerateContent(_) => "regenerateContent",
            ApiError::AnalyzeText(_) => "analyzeText",
        }
    }

    pub fn cause(&self) -> &ls_core::Error {
        match self {
            ApiError::CreateArticle(e) | ApiError::RegenerateContent(e) | ApiError::AnalyzeText(e) => e,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let cause = self.cause();
        error!(
            operation = self.operation(),
            kind = cause.kind(),
            error = %cause,
            "{}",
            self
        );

        let body = CallableError::internal(self.to_string());
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
