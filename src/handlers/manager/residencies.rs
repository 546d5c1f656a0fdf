// /api/manager/residencies - residency listing, provisioning, rename and
// soft delete for the authenticated manager

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::Residency;
use crate::error::ApiError;
use crate::handlers::resolve_manager;
use crate::middleware::auth::VerifiedIdentity;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::provisioning::{self, NewResidency};
use crate::services::scope;
use crate::AppState;

/// GET /api/manager/residencies - residencies reachable through the
/// manager's links, newest first
pub async fn residencies_get(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> ApiResult<Vec<Residency>> {
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let residencies = sqlx::query_as::<_, Residency>(
        r#"
        SELECT r.*
        FROM manager_residencies mr
        JOIN residencies r ON r.id = mr.residency_id
        WHERE mr.manager_id = $1 AND r.is_active = TRUE
        ORDER BY r.created_at DESC
        "#,
    )
    .bind(manager_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(ApiResponse::success(residencies))
}

#[derive(Debug, Deserialize)]
pub struct CreateResidencyRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub property_type: String,
}

#[derive(Debug, Serialize)]
pub struct CreateResidencyResponse {
    pub residency: Residency,
    pub access_code: String,
}

/// POST /api/manager/residencies - provision an additional residency for an
/// already-registered manager
pub async fn residencies_post(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Json(body): Json<CreateResidencyRequest>,
) -> ApiResult<CreateResidencyResponse> {
    let provisioned = provisioning::provision(
        &state.pool,
        &identity,
        NewResidency {
            name: body.name,
            property_type: body.property_type,
        },
        None,
        false,
    )
    .await?;

    Ok(ApiResponse::created(CreateResidencyResponse {
        residency: provisioned.residency,
        access_code: provisioned.access_code,
    }))
}

#[derive(Debug, Deserialize)]
pub struct RenameResidencyRequest {
    #[serde(default)]
    pub name: String,
}

/// PATCH /api/manager/residencies/:id - rename
pub async fn residency_patch(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
    Json(body): Json<RenameResidencyRequest>,
) -> ApiResult<Residency> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }

    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize(&mut conn, manager_id, residency_id).await?;

    let residency = sqlx::query_as::<_, Residency>(
        r#"
        UPDATE residencies
        SET name = $1, updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(residency_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(ApiResponse::success(residency))
}

/// DELETE /api/manager/residencies/:id - soft delete; the row stays, the
/// active flag flips
pub async fn residency_delete(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
) -> ApiResult<()> {
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize(&mut conn, manager_id, residency_id).await?;

    sqlx::query(
        "UPDATE residencies SET is_active = FALSE, updated_at = now() WHERE id = $1",
    )
    .bind(residency_id)
    .execute(&mut *conn)
    .await?;

    Ok(ApiResponse::<()>::no_content())
}
