use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stargaze API",
        version = "1.0.0",
        description = "Gateways to NASA's Astronomy Picture of the Day and to AI-simplified explanations.",
    ),
    paths(
        handlers::health::health_check,
        handlers::images::get_images,
        handlers::explain::explain_image,
        handlers::explain::summarize_images,
    ),
    components(schemas(
        models::MediaType,
        models::ImageRecord,
        models::ImagePayload,
        models::ExplanationRecord,
        dto::ExplainRequest,
        dto::SummaryRequest,
        dto::SummaryResponse,
        dto::ErrorBody,
        handlers::health::HealthData,
        handlers::health::UpstreamStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "images", description = "Astronomy Picture of the Day records"),
        (name = "explanations", description = "AI-generated explanations and summaries"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
