// /api/manager/maintenance - maintenance request listings and the status
// transition endpoint

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::models::{MaintenanceRequest, MaintenanceStatus};
use crate::error::ApiError;
use crate::handlers::resolve_manager;
use crate::middleware::auth::VerifiedIdentity;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{maintenance, scope};
use crate::AppState;

/// Listing shape for manager dashboards.
#[derive(Debug, Serialize, FromRow)]
pub struct MaintenanceListEntry {
    pub id: Uuid,
    pub residency_id: Uuid,
    pub status: String,
    pub title: String,
    pub description: Option<String>,
    pub resident_name: Option<String>,
    pub unit_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<String>,
}

fn parse_filter(filter: &StatusFilter) -> Result<Option<MaintenanceStatus>, ApiError> {
    match filter.status.as_deref() {
        None | Some("") => Ok(None),
        Some(value) => MaintenanceStatus::parse(value)
            .map(Some)
            .ok_or_else(|| ApiError::bad_request(format!("Unknown status '{}'", value))),
    }
}

/// GET /api/manager/maintenance?status= - requests across every residency
/// the manager is linked to
pub async fn maintenance_get(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Query(filter): Query<StatusFilter>,
) -> ApiResult<Vec<MaintenanceListEntry>> {
    let status = parse_filter(&filter)?;
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let base = r#"
        SELECT m.id, m.residency_id, m.status, m.title, m.description,
               m.resident_name, m.unit_number, m.created_at
        FROM maintenance_requests m
        JOIN manager_residencies mr ON mr.residency_id = m.residency_id
        WHERE mr.manager_id = $1
    "#;

    let entries = match status {
        Some(status) => {
            sqlx::query_as::<_, MaintenanceListEntry>(&format!(
                "{} AND m.status = $2 ORDER BY m.created_at DESC",
                base
            ))
            .bind(manager_id)
            .bind(status.as_str())
            .fetch_all(&state.pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, MaintenanceListEntry>(&format!(
                "{} ORDER BY m.created_at DESC",
                base
            ))
            .bind(manager_id)
            .fetch_all(&state.pool)
            .await?
        }
    };

    Ok(ApiResponse::success(entries))
}

/// GET /api/manager/residencies/:id/maintenance?status= - requests for one
/// residency, scope-guarded before any data access
pub async fn residency_maintenance_get(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(residency_id): Path<Uuid>,
    Query(filter): Query<StatusFilter>,
) -> ApiResult<Vec<MaintenanceListEntry>> {
    let status = parse_filter(&filter)?;
    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let mut conn = state.pool.acquire().await?;
    scope::authorize(&mut conn, manager_id, residency_id).await?;

    let base = r#"
        SELECT id, residency_id, status, title, description,
               resident_name, unit_number, created_at
        FROM maintenance_requests
        WHERE residency_id = $1
    "#;

    let entries = match status {
        Some(status) => {
            sqlx::query_as::<_, MaintenanceListEntry>(&format!(
                "{} AND status = $2 ORDER BY created_at DESC",
                base
            ))
            .bind(residency_id)
            .bind(status.as_str())
            .fetch_all(&mut *conn)
            .await?
        }
        None => {
            sqlx::query_as::<_, MaintenanceListEntry>(&format!(
                "{} ORDER BY created_at DESC",
                base
            ))
            .bind(residency_id)
            .fetch_all(&mut *conn)
            .await?
        }
    };

    Ok(ApiResponse::success(entries))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// PUT|PATCH /api/manager/maintenance/:id/status - drive the status machine
pub async fn maintenance_status_update(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Path(request_id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<MaintenanceRequest> {
    if body.status.trim().is_empty() {
        return Err(ApiError::bad_request("status is required"));
    }

    let manager_id = resolve_manager(&state.pool, &identity).await?;

    let updated =
        maintenance::transition(&state.pool, request_id, body.status.trim(), manager_id).await?;

    Ok(ApiResponse::success(updated))
}
