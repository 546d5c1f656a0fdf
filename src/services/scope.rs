use sqlx::PgConnection;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("manager is not linked to this residency")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Authorize a manager for a residency: allowed iff the
/// `manager_residencies` edge exists. Every residency-scoped operation
/// calls this (or one of the variants below, whose join paths terminate at
/// the same edge) before touching any data.
pub async fn authorize(
    conn: &mut PgConnection,
    manager_id: Uuid,
    residency_id: Uuid,
) -> Result<(), AuthorizationError> {
    let linked: Option<i32> = sqlx::query_scalar(
        r#"
        SELECT 1
        FROM manager_residencies
        WHERE manager_id = $1 AND residency_id = $2
        "#,
    )
    .bind(manager_id)
    .bind(residency_id)
    .fetch_optional(&mut *conn)
    .await?;

    match linked {
        Some(_) => Ok(()),
        None => Err(AuthorizationError::Forbidden),
    }
}

/// Authorize a manager for a maintenance request via the request's
/// residency. Returns the residency id for callers that need it.
pub async fn authorize_maintenance(
    conn: &mut PgConnection,
    manager_id: Uuid,
    request_id: Uuid,
) -> Result<Uuid, AuthorizationError> {
    let residency_id: Option<Uuid> =
        sqlx::query_scalar("SELECT residency_id FROM maintenance_requests WHERE id = $1")
            .bind(request_id)
            .fetch_optional(&mut *conn)
            .await?;

    let residency_id =
        residency_id.ok_or(AuthorizationError::NotFound("Maintenance request"))?;

    authorize(conn, manager_id, residency_id).await?;
    Ok(residency_id)
}

/// Authorize a manager for a template item through the item's template and
/// residency.
pub async fn authorize_template_item(
    conn: &mut PgConnection,
    manager_id: Uuid,
    item_id: Uuid,
) -> Result<(), AuthorizationError> {
    let residency_id: Option<Uuid> = sqlx::query_scalar(
        r#"
        SELECT rt.residency_id
        FROM residency_template_items rti
        JOIN residency_templates rt ON rt.id = rti.template_id
        WHERE rti.id = $1
        "#,
    )
    .bind(item_id)
    .fetch_optional(&mut *conn)
    .await?;

    let residency_id = residency_id.ok_or(AuthorizationError::NotFound("Template item"))?;

    authorize(conn, manager_id, residency_id).await
}

/// Authorize a manager for an FAQ entry through the entry's residency.
pub async fn authorize_faq(
    conn: &mut PgConnection,
    manager_id: Uuid,
    faq_id: Uuid,
) -> Result<(), AuthorizationError> {
    let residency_id: Option<Uuid> =
        sqlx::query_scalar("SELECT residency_id FROM faqs WHERE id = $1")
            .bind(faq_id)
            .fetch_optional(&mut *conn)
            .await?;

    let residency_id = residency_id.ok_or(AuthorizationError::NotFound("FAQ"))?;

    authorize(conn, manager_id, residency_id).await
}
