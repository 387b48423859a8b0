use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// The upstream operation a gateway was performing when it failed.
///
/// Each call has a fixed public message; the upstream's own error detail is
/// only ever logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamCall {
    FetchImages,
    Explain,
    Summarize,
}

impl UpstreamCall {
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::FetchImages => "Failed to fetch NASA data",
            Self::Explain => "Failed to generate explanation",
            Self::Summarize => "Failed to generate image summary",
        }
    }
}

impl std::fmt::Display for UpstreamCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FetchImages => write!(f, "image source"),
            Self::Explain => write!(f, "explanation source"),
            Self::Summarize => write!(f, "summary source"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StargazeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream {call} error: {detail}")]
    Upstream { call: UpstreamCall, detail: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl StargazeError {
    /// Attribute a transport-level failure to the upstream call that caused it.
    ///
    /// Configuration and validation errors pass through unchanged so they keep
    /// their own status codes.
    pub fn during(self, call: UpstreamCall) -> Self {
        match self {
            Self::Llm(detail) | Self::Internal(detail) => Self::Upstream { call, detail },
            Self::Http(e) => Self::Upstream {
                call,
                detail: e.to_string(),
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message safe to hand to callers.
    pub fn public_message(&self) -> String {
        match self {
            Self::Configuration(msg) | Self::Validation(msg) => msg.clone(),
            Self::Upstream { call, .. } => call.public_message().to_string(),
            _ => "An internal error occurred".to_string(),
        }
    }
}

impl IntoResponse for StargazeError {
    fn into_response(self) -> Response {
        match &self {
            Self::Validation(_) => tracing::debug!(error = %self, "Rejected request"),
            Self::Configuration(_) => tracing::error!(error = %self, "Gateway not configured"),
            _ => tracing::error!(error = %self, "Gateway call failed"),
        }

        let body = Json(json!({ "error": self.public_message() }));

        (self.status(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, StargazeError>;
