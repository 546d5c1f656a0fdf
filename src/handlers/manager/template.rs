// /api/manager template endpoints - reading the residency's informational
// content and editing its items

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{ResidencyTemplate, TemplateCategory, TemplateItem};
use crate::error::ApiError;
use crate::handlers::resolve_manager;
use crate::middleware::auth::VerifiedIdentity;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::scope;
use crate::AppState;

/// Template metadata plus its items grouped by category.
#[derive(Debug, Serialize)]
pub struct TemplateView {
    pub id: Uuid,
    pub version: i32,
    pub updated_at: DateTime<Utc>,
    pub items: BTreeMap<String, Vec<TemplateItem>>,
}

/// GET /api/manager/residencies/:id/template - version and items grouped
/// by category
pub async fn template_get(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
) -> ApiResult<TemplateView> {
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize(&mut conn, manager_id, residency_id).await?;

    let template: Option<ResidencyTemplate> =
        sqlx::query_as("SELECT * FROM residency_templates WHERE residency_id = $1")
            .bind(residency_id)
            .fetch_optional(&mut *conn)
            .await?;

    let template = template.ok_or_else(|| ApiError::not_found("Template not found"))?;

    let items = sqlx::query_as::<_, TemplateItem>(
        r#"
        SELECT *
        FROM residency_template_items
        WHERE template_id = $1
        ORDER BY category, sort_order
        "#,
    )
    .bind(template.id)
    .fetch_all(&mut *conn)
    .await?;

    let mut grouped: BTreeMap<String, Vec<TemplateItem>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.category.clone()).or_default().push(item);
    }

    Ok(ApiResponse::success(TemplateView {
        id: template.id,
        version: template.version,
        updated_at: template.updated_at,
        items: grouped,
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateItemRequest {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
}

/// POST /api/manager/residencies/:id/template-items - append an item; the
/// sort order continues from the template's current maximum
pub async fn template_items_post(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
    Json(body): Json<CreateTemplateItemRequest>,
) -> ApiResult<TemplateItem> {
    let label = body.label.trim();
    let content = body.content.trim();
    if body.category.is_empty() || label.is_empty() || content.is_empty() {
        return Err(ApiError::bad_request("category, label and content are required"));
    }

    let category = TemplateCategory::parse(&body.category)
        .ok_or_else(|| ApiError::bad_request("Invalid category"))?;

    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut tx = state.pool.begin().await?;
    scope::authorize(&mut tx, manager_id, residency_id).await?;

    let template_id: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM residency_templates WHERE residency_id = $1")
            .bind(residency_id)
            .fetch_optional(&mut *tx)
            .await?;

    let template_id = template_id.ok_or_else(|| ApiError::not_found("Template not found"))?;

    let next_order: i32 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(MAX(sort_order), 0) + 1
        FROM residency_template_items
        WHERE template_id = $1
        "#,
    )
    .bind(template_id)
    .fetch_one(&mut *tx)
    .await?;

    let item = sqlx::query_as::<_, TemplateItem>(
        r#"
        INSERT INTO residency_template_items
        (template_id, category, label, content, sort_order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(template_id)
    .bind(category.as_str())
    .bind(label)
    .bind(content)
    .bind(next_order)
    .fetch_one(&mut *tx)
    .await?;

    bump_template_version(&mut tx, template_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::created(item))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateItemRequest {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub content: String,
}

/// PATCH /api/manager/template-items/:id - edit label and content. The
/// ownership check walks item -> template -> residency -> manager link.
pub async fn template_item_patch(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(item_id): Path<Uuid>,
    Json(body): Json<UpdateTemplateItemRequest>,
) -> ApiResult<TemplateItem> {
    let label = body.label.trim();
    let content = body.content.trim();
    if label.is_empty() || content.is_empty() {
        return Err(ApiError::bad_request("label and content are required"));
    }

    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut tx = state.pool.begin().await?;
    scope::authorize_template_item(&mut tx, manager_id, item_id).await?;

    let item = sqlx::query_as::<_, TemplateItem>(
        r#"
        UPDATE residency_template_items
        SET label = $1, content = $2, updated_at = now()
        WHERE id = $3
        RETURNING *
        "#,
    )
    .bind(label)
    .bind(content)
    .bind(item_id)
    .fetch_one(&mut *tx)
    .await?;

    bump_template_version(&mut tx, item.template_id).await?;
    tx.commit().await?;

    Ok(ApiResponse::success(item))
}

async fn bump_template_version(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    template_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE residency_templates SET version = version + 1, updated_at = now() WHERE id = $1",
    )
    .bind(template_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
