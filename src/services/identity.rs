use sqlx::{FromRow, PgConnection};
use thiserror::Error;
use uuid::Uuid;

use crate::middleware::auth::VerifiedIdentity;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("verified token is missing a subject id")]
    InvalidClaims,
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

/// Outcome of resolving an external subject id. `created` is true only
/// when this call inserted the manager row.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct ResolvedManager {
    pub id: Uuid,
    pub created: bool,
}

// xmax is zero only on a freshly inserted row, so the statement itself
// reports whether it took the insert or the update arm.
const INSERT_OR_GET: &str = r#"
INSERT INTO managers (subject_id, email, full_name)
VALUES ($1, $2, $3)
ON CONFLICT (subject_id)
DO UPDATE SET email = EXCLUDED.email, updated_at = now()
RETURNING id, (xmax = 0) AS created
"#;

/// Resolve a verified external identity to the internal manager id,
/// creating the manager on first sight.
///
/// Implemented as a single insert-or-get statement so that two concurrent
/// first-time requests for the same subject id cannot create duplicate
/// rows; the `subject_id` unique constraint arbitrates, both callers
/// receive the same id, and exactly one sees `created`. The stored email is
/// refreshed on every resolve; `full_name` is only set at creation and left
/// untouched afterwards.
pub async fn resolve(
    conn: &mut PgConnection,
    identity: &VerifiedIdentity,
    full_name: Option<&str>,
) -> Result<ResolvedManager, IdentityError> {
    if identity.subject.trim().is_empty() {
        return Err(IdentityError::InvalidClaims);
    }

    let resolved: ResolvedManager = sqlx::query_as(INSERT_OR_GET)
        .bind(&identity.subject)
        .bind(&identity.email)
        .bind(full_name)
        .fetch_one(&mut *conn)
        .await?;

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_or_get_arbitrates_on_the_subject_key() {
        assert!(INSERT_OR_GET.contains("ON CONFLICT (subject_id)"));
        assert!(INSERT_OR_GET.contains("DO UPDATE SET email = EXCLUDED.email"));
        assert!(INSERT_OR_GET.contains("RETURNING id"));
    }

    #[test]
    fn insert_or_get_reports_which_arm_ran() {
        assert!(INSERT_OR_GET.contains("(xmax = 0) AS created"));
    }
}
