use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{MaintenanceRequest, MaintenanceStatus};
use crate::services::scope::{self, AuthorizationError};

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("unknown status '{0}'")]
    UnknownStatus(String),
    #[error("illegal transition from '{from}' to '{to}'")]
    IllegalTransition {
        from: MaintenanceStatus,
        to: MaintenanceStatus,
    },
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Apply a status transition to a maintenance request.
///
/// Runs in one transaction: scope check first (forbidden short-circuits
/// with no side effects), then fetch, validate against the transition
/// table, and update. The update and the validation see the same snapshot,
/// so a concurrent transition cannot slip an illegal edge through.
pub async fn transition(
    pool: &PgPool,
    request_id: Uuid,
    requested: &str,
    manager_id: Uuid,
) -> Result<MaintenanceRequest, StatusError> {
    let mut tx = pool.begin().await?;

    scope::authorize_maintenance(&mut tx, manager_id, request_id).await?;

    let current_value: String =
        sqlx::query_scalar("SELECT status FROM maintenance_requests WHERE id = $1 FOR UPDATE")
            .bind(request_id)
            .fetch_one(&mut *tx)
            .await?;

    let requested_status = MaintenanceStatus::parse(requested)
        .ok_or_else(|| StatusError::UnknownStatus(requested.to_string()))?;

    let current = MaintenanceStatus::parse(&current_value)
        .ok_or_else(|| StatusError::UnknownStatus(current_value.clone()))?;

    if !current.allows(requested_status) {
        return Err(StatusError::IllegalTransition {
            from: current,
            to: requested_status,
        });
    }

    let updated: MaintenanceRequest = sqlx::query_as(
        r#"
        UPDATE maintenance_requests
        SET status = $1, updated_at = now()
        WHERE id = $2
        RETURNING *
        "#,
    )
    .bind(requested_status.as_str())
    .bind(request_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        request = %request_id,
        "Maintenance status {} -> {}",
        current,
        requested_status
    );

    Ok(updated)
}
