// /api/manager FAQ endpoints - scope-guarded writes; public reads live
// under /api/public

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::database::models::Faq;
use crate::error::ApiError;
use crate::handlers::resolve_manager;
use crate::middleware::auth::VerifiedIdentity;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::scope;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct FaqRequest {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

fn validate(body: &FaqRequest) -> Result<(&str, &str), ApiError> {
    let question = body.question.trim();
    let answer = body.answer.trim();
    if question.is_empty() || answer.is_empty() {
        return Err(ApiError::bad_request("question and answer are required"));
    }
    Ok((question, answer))
}

/// POST /api/manager/residencies/:id/faqs
pub async fn faqs_post(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
    Json(body): Json<FaqRequest>,
) -> ApiResult<Faq> {
    let (question, answer) = validate(&body)?;
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize(&mut conn, manager_id, residency_id).await?;

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        INSERT INTO faqs (residency_id, question, answer)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(residency_id)
    .bind(question)
    .bind(answer)
    .fetch_one(&mut *conn)
    .await?;

    Ok(ApiResponse::created(faq))
}

/// PATCH /api/manager/faqs/:id
pub async fn faq_patch(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(faq_id): Path<Uuid>,
    Json(body): Json<FaqRequest>,
) -> ApiResult<Faq> {
    let (question, answer) = validate(&body)?;
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize_faq(&mut conn, manager_id, faq_id).await?;

    let faq = sqlx::query_as::<_, Faq>(
        r#"
        UPDATE faqs
        SET question = $1, answer = $2, updated_at = now()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(question)
    .bind(answer)
    .bind(faq_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(ApiResponse::success(faq))
}
