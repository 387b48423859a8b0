use axum::extract::State;
use axum::Json;

use crate::api::dto::ErrorBody;
use crate::api::extractors::AppQuery;
use crate::api::AppState;
use crate::error::Result;
use crate::models::{ImagePayload, ImageQuery, ImageQueryParams};

/// `GET /api/nasa`
///
/// A complete `start_date`/`end_date` pair returns the upstream's array for
/// that range; otherwise `date` returns that day's record, and no parameters
/// return today's. The credential is checked before the parameters.
#[utoipa::path(
    get,
    path = "/api/nasa",
    tag = "images",
    operation_id = "images.fetch",
    params(ImageQueryParams),
    responses(
        (status = 200, description = "One record, or an array for a range", body = ImagePayload),
        (status = 400, description = "Malformed query string or date parameters", body = ErrorBody),
        (status = 500, description = "Missing credential or upstream failure", body = ErrorBody),
    )
)]
pub async fn get_images(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<ImageQueryParams>,
) -> Result<Json<ImagePayload>> {
    state.images.ensure_configured()?;
    let query = ImageQuery::try_from(params)?;
    let payload = state.images.fetch(query).await?;
    Ok(Json(payload))
}
