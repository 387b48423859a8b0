use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::AppState;

/// Reports which upstreams have credentials. Never echoes the credentials.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub image_source: UpstreamStatus,
    pub explanation_source: UpstreamStatus,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UpstreamStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl UpstreamStatus {
    fn from_configured(configured: bool, model: Option<String>) -> Self {
        Self {
            status: if configured { "configured" } else { "unconfigured" }.to_string(),
            model,
        }
    }
}

/// `GET /api/health`
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health status", body = HealthData),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthData> {
    Json(HealthData {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        image_source: UpstreamStatus::from_configured(state.images.is_configured(), None),
        explanation_source: UpstreamStatus::from_configured(
            state.explanations.is_configured(),
            Some(state.explanations.model().to_string()),
        ),
    })
}
