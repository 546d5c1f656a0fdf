use sqlx::{PgConnection, PgPool};
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Residency, TemplateCategory};
use crate::middleware::auth::VerifiedIdentity;
use crate::services::{access_code, identity, identity::IdentityError};

#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("manager is already registered")]
    DuplicateRegistration,
    #[error("access code space exhausted after {0} attempts")]
    CodeSpaceExhausted(u32),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Storage(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct NewResidency {
    pub name: String,
    pub property_type: String,
}

#[derive(Debug)]
pub struct Provisioned {
    pub manager_id: Uuid,
    pub residency: Residency,
    pub access_code: String,
}

/// Default content seeded into every new residency template, in sort order.
pub const DEFAULT_TEMPLATE_ITEMS: [(TemplateCategory, &str); 6] = [
    (TemplateCategory::Utilities, "Electricity Provider"),
    (TemplateCategory::EmergencyContacts, "Security Contact"),
    (TemplateCategory::Rules, "Quiet Hours"),
    (TemplateCategory::Amenities, "Pool Hours"),
    (TemplateCategory::Security, "Access Procedure"),
    (TemplateCategory::GeneralInfo, "Waste Collection"),
];

const DEFAULT_ITEM_CONTENT: &str = "Enter details here.";

/// Provision a residency for a manager as one atomic unit: resolve or
/// create the manager, allocate a unique access code, insert the residency,
/// link the manager to it, and seed the default template. Any failure rolls
/// the whole call back; a residency is never visible without its manager
/// link and template.
///
/// `first_time` marks the onboarding path: it rejects a subject that
/// already has a manager record. The decision comes from the resolve
/// statement's insert outcome rather than a separate existence check, so
/// two concurrent onboarding calls for one subject cannot both pass.
/// Existing managers may provision any number of additional residencies
/// through the non-onboarding path.
pub async fn provision(
    pool: &PgPool,
    identity: &VerifiedIdentity,
    params: NewResidency,
    full_name: Option<&str>,
    first_time: bool,
) -> Result<Provisioned, ProvisioningError> {
    let name = params.name.trim();
    let property_type = params.property_type.trim();

    if name.is_empty() {
        return Err(ProvisioningError::MissingField("name"));
    }
    if property_type.is_empty() {
        return Err(ProvisioningError::MissingField("property_type"));
    }

    let mut tx = pool.begin().await?;

    let manager = identity::resolve(&mut tx, identity, full_name).await?;
    if first_time && !manager.created {
        return Err(ProvisioningError::DuplicateRegistration);
    }
    let manager_id = manager.id;

    let access_code = access_code::generate(&mut tx).await?;

    let residency: Residency = sqlx::query_as(
        r#"
        INSERT INTO residencies (name, property_type, access_code)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(name)
    .bind(property_type)
    .bind(&access_code)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO manager_residencies (manager_id, residency_id) VALUES ($1, $2)")
        .bind(manager_id)
        .bind(residency.id)
        .execute(&mut *tx)
        .await?;

    let template_id: Uuid = sqlx::query_scalar(
        "INSERT INTO residency_templates (residency_id) VALUES ($1) RETURNING id",
    )
    .bind(residency.id)
    .fetch_one(&mut *tx)
    .await?;

    seed_default_items(&mut tx, template_id).await?;

    tx.commit().await?;

    tracing::info!(
        residency = %residency.id,
        manager = %manager_id,
        "Provisioned residency '{}'",
        residency.name
    );

    Ok(Provisioned {
        manager_id,
        residency,
        access_code,
    })
}

async fn seed_default_items(
    conn: &mut PgConnection,
    template_id: Uuid,
) -> Result<(), sqlx::Error> {
    for (index, (category, label)) in DEFAULT_TEMPLATE_ITEMS.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO residency_template_items
            (template_id, category, label, content, sort_order)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(template_id)
        .bind(category.as_str())
        .bind(label)
        .bind(DEFAULT_ITEM_CONTENT)
        .bind((index + 1) as i32)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_items_cover_every_category_once() {
        let categories: Vec<TemplateCategory> =
            DEFAULT_TEMPLATE_ITEMS.iter().map(|(c, _)| *c).collect();

        assert_eq!(categories.len(), 6);
        for category in TemplateCategory::ALL {
            assert_eq!(categories.iter().filter(|c| **c == category).count(), 1);
        }
    }

    #[test]
    fn default_item_labels_are_distinct() {
        let labels: std::collections::HashSet<&str> =
            DEFAULT_TEMPLATE_ITEMS.iter().map(|(_, l)| *l).collect();
        assert_eq!(labels.len(), DEFAULT_TEMPLATE_ITEMS.len());
    }
}
