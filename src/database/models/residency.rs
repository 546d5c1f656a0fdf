use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A managed property or community. Soft-deleted by clearing `is_active`,
/// never removed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Residency {
    pub id: Uuid,
    pub name: String,
    pub property_type: String,
    pub access_code: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
