pub mod manager;
pub mod public;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::VerifiedIdentity;
use crate::services::identity;

/// Resolve the request's verified identity to an internal manager id.
/// Every authenticated handler goes through this; a first-seen subject id
/// gets a manager record here.
pub(crate) async fn resolve_manager(
    pool: &PgPool,
    identity: &VerifiedIdentity,
) -> Result<Uuid, ApiError> {
    let mut conn = pool.acquire().await?;
    Ok(identity::resolve(&mut conn, identity, None).await?.id)
}
