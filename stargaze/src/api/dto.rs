//! Request and response bodies for the gateway endpoints.
//!
//! Image and explanation records are served in their own wire formats
//! (`crate::models`); only the envelopes that exist purely at the HTTP
//! boundary live here.

use serde::{Deserialize, Serialize};

use crate::models::ImageRecord;

/// Body of `POST /api/explain`.
///
/// `image` is optional at the type level so that an absent or `null` record
/// is reported as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ExplainRequest {
    pub image: Option<ImageRecord>,
}

/// Body of `POST /api/summary`.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummaryRequest {
    #[serde(default)]
    pub images: Vec<ImageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}

/// Every gateway failure has this shape.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explain_request_without_image() {
        let req: ExplainRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.image.is_none());

        let req: ExplainRequest = serde_json::from_str(r#"{"image": null}"#).expect("deserialize");
        assert!(req.image.is_none());
    }

    #[test]
    fn summary_request_defaults_to_empty() {
        let req: SummaryRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.images.is_empty());
    }
}
