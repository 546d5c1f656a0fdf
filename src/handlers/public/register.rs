// POST /api/public/register-manager - first-time manager onboarding

use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::database::models::Residency;
use crate::error::ApiError;
use crate::middleware::auth::VerifiedIdentity;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::provisioning::{self, NewResidency};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterManagerRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub residency_name: String,
    #[serde(default)]
    pub property_type: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterManagerResponse {
    pub access_code: String,
    pub residency: Residency,
}

/// Registers the verified identity as a manager and provisions their first
/// residency in one atomic call. A subject that already has a manager
/// record is rejected; additional residencies go through
/// POST /api/manager/residencies.
pub async fn register_manager_post(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    Json(body): Json<RegisterManagerRequest>,
) -> ApiResult<RegisterManagerResponse> {
    let full_name = body.full_name.trim();
    if full_name.is_empty() {
        return Err(ApiError::bad_request("full_name is required"));
    }

    let provisioned = provisioning::provision(
        &state.pool,
        &identity,
        NewResidency {
            name: body.residency_name,
            property_type: body.property_type,
        },
        Some(full_name),
        true,
    )
    .await?;

    Ok(ApiResponse::created(RegisterManagerResponse {
        access_code: provisioned.access_code,
        residency: provisioned.residency,
    }))
}
