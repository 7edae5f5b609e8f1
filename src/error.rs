// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::message::ChatReply;

pub const MISSING_MESSAGE: &str = "Message is required";
pub const MISSING_API_KEY: &str = "Server configuration error: Missing API Key";
pub const RELAY_FAILED: &str = "Failed to process insurance request";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Upstream,
    Transport,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Upstream => "upstream",
            ErrorKind::Transport => "transport",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Message is required")]
    Validation,

    #[error("Server configuration error: Missing API Key")]
    Configuration,

    /// The generative API answered with its own error object.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Network failure or a body we could not make sense of.
    #[error("transport error: {0}")]
    Transport(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation => ErrorKind::Validation,
            AppError::Configuration => ErrorKind::Configuration,
            AppError::Upstream(_) => ErrorKind::Upstream,
            AppError::Transport(_) => ErrorKind::Transport,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to the browser.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::Validation => MISSING_MESSAGE,
            AppError::Configuration => MISSING_API_KEY,
            AppError::Upstream(_) | AppError::Transport(_) => RELAY_FAILED,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(%rejection, "Rejected chat request body");
        AppError::Validation
    }
}

impl From<AppError> for ChatReply {
    fn from(err: AppError) -> Self {
        ChatReply::Error {
            error: err.public_message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Validation => warn!(kind = self.kind().as_str(), "{}", self),
            _ => error!(kind = self.kind().as_str(), "Backend error: {}", self),
        }
        (status, Json(ChatReply::from(self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_message_per_kind() {
        assert_eq!(AppError::Validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Validation.public_message(), "Message is required");
        assert_eq!(
            AppError::Configuration.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let upstream = AppError::Upstream("quota exceeded".into());
        assert_eq!(upstream.kind(), ErrorKind::Upstream);
        assert!(upstream.to_string().contains("quota exceeded"));
        assert_eq!(upstream.public_message(), RELAY_FAILED);
    }

    #[test]
    fn transport_detail_stays_internal() {
        let err = AppError::Transport("connection refused at 10.0.0.1".into());
        let reply = ChatReply::from(err);
        assert_eq!(
            reply,
            ChatReply::Error {
                error: RELAY_FAILED.to_string()
            }
        );
    }
}
