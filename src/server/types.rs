use crate::Error;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RelayRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlueprintResponse {
    pub blueprint: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Self::default()
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            Error::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorResponse::new(message),
            ),
            // Configuration detail stays in the logs.
            Error::MissingCredential => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(message),
            ),
            Error::MissingPrompt | Error::PromptTooLong { .. } => {
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            Error::Upstream { status, .. } => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    status: Some(status),
                    ..ErrorResponse::new("AI service error")
                },
            ),
            Error::EmptyCompletion => (StatusCode::BAD_GATEWAY, ErrorResponse::new(message)),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    message: Some(message),
                    ..ErrorResponse::new("Internal Server Error")
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
