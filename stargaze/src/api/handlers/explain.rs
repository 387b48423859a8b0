use axum::extract::State;
use axum::Json;

use crate::api::dto::{ErrorBody, ExplainRequest, SummaryRequest, SummaryResponse};
use crate::api::extractors::AppJson;
use crate::api::AppState;
use crate::error::{Result, StargazeError};
use crate::models::ExplanationRecord;

/// `POST /api/explain`
///
/// Always answers with the three-field record. When the model's reply is not
/// the requested JSON, the reply text is returned as the explanation with
/// placeholder features and context.
#[utoipa::path(
    post,
    path = "/api/explain",
    tag = "explanations",
    operation_id = "explanations.explain",
    request_body = ExplainRequest,
    responses(
        (status = 200, description = "Explanation for the image", body = ExplanationRecord),
        (status = 400, description = "Missing or malformed image record", body = ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorBody),
    )
)]
pub async fn explain_image(
    State(state): State<AppState>,
    AppJson(req): AppJson<ExplainRequest>,
) -> Result<Json<ExplanationRecord>> {
    let image = req
        .image
        .ok_or_else(|| StargazeError::Validation("Image data is required".to_string()))?;

    let explanation = state.explanations.explain(&image).await?;
    Ok(Json(explanation.into_record()))
}

/// `POST /api/summary`
#[utoipa::path(
    post,
    path = "/api/summary",
    tag = "explanations",
    operation_id = "explanations.summarize",
    request_body = SummaryRequest,
    responses(
        (status = 200, description = "Short overview of the collection", body = SummaryResponse),
        (status = 400, description = "No images supplied", body = ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorBody),
    )
)]
pub async fn summarize_images(
    State(state): State<AppState>,
    AppJson(req): AppJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>> {
    let summary = state.explanations.summarize(&req.images).await?;
    Ok(Json(SummaryResponse { summary }))
}
