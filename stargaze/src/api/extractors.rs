use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::error::StargazeError;

/// `axum::Json` whose rejections become [`StargazeError::Validation`], so
/// malformed bodies get the same `{"error": ...}` shape as every other
/// failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(StargazeError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Query` with the same error mapping as [`AppJson`].
///
/// Query strings the gateway cannot read (repeated keys, non-UTF-8) are
/// validation errors rather than axum's plain-text rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(StargazeError))]
pub struct AppQuery<T>(pub T);

impl From<JsonRejection> for StargazeError {
    fn from(rejection: JsonRejection) -> Self {
        map_json_rejection(rejection)
    }
}

impl From<QueryRejection> for StargazeError {
    fn from(rejection: QueryRejection) -> Self {
        StargazeError::Validation(format!("Invalid query string: {}", query_detail(&rejection)))
    }
}

/// The deserializer's own message without axum's generic prefix.
fn query_detail(rejection: &QueryRejection) -> String {
    let text = rejection.body_text();
    match text.split_once(": ") {
        Some((_, detail)) if !detail.is_empty() => detail.to_string(),
        _ => text,
    }
}

fn map_json_rejection(rejection: JsonRejection) -> StargazeError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let message = err.body_text();
            if let Some(field) = extract_missing_field(&message) {
                StargazeError::Validation(format!("Missing required field: {field}"))
            } else {
                StargazeError::Validation(format!("Invalid JSON: {message}"))
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            StargazeError::Validation(format!("JSON syntax error: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => StargazeError::Validation(
            "Missing `Content-Type: application/json` header".to_string(),
        ),
        JsonRejection::BytesRejection(_) => {
            StargazeError::Internal("Failed to read request body".to_string())
        }
        _ => StargazeError::Validation(rejection.body_text()),
    }
}

fn extract_missing_field(message: &str) -> Option<&str> {
    let prefix = "missing field `";
    let start = message.find(prefix)? + prefix.len();
    let remaining = message.get(start..)?;
    let end = remaining.find('`')?;
    remaining.get(..end)
}
