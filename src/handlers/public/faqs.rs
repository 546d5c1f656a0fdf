// GET /api/public/residencies/:id/faqs - unauthenticated FAQ listing

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::models::Faq;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::AppState;

pub async fn faqs_get(
    State(state): State<AppState>,
    Path(residency_id): Path<Uuid>,
) -> ApiResult<Vec<Faq>> {
    let faqs = sqlx::query_as::<_, Faq>(
        "SELECT * FROM faqs WHERE residency_id = $1 ORDER BY created_at",
    )
    .bind(residency_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(faqs))
}
