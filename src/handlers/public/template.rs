// GET /api/public/template/:access_code - informational content for
// end-users, keyed by the residency's shareable access code

use axum::extract::{Path, State};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize, FromRow)]
pub struct PublicTemplateItem {
    pub category: String,
    pub label: String,
    pub content: String,
}

pub async fn template_by_code_get(
    State(state): State<AppState>,
    Path(access_code): Path<String>,
) -> ApiResult<Vec<PublicTemplateItem>> {
    let template_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT rt.id
        FROM residencies r
        JOIN residency_templates rt ON rt.residency_id = r.id
        WHERE r.access_code = $1 AND r.is_active = TRUE
        "#,
    )
    .bind(&access_code)
    .fetch_optional(&state.pool)
    .await?;

    let template_id = template_id.ok_or_else(|| ApiError::not_found("Invalid access code"))?;

    let items = sqlx::query_as::<_, PublicTemplateItem>(
        r#"
        SELECT category, label, content
        FROM residency_template_items
        WHERE template_id = $1
        ORDER BY category, sort_order
        "#,
    )
    .bind(template_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(items))
}
