mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

fn unique_subject() -> String {
    format!("test-subject-{}", Uuid::new_v4())
}

/// Maintenance requests are created by the resident-facing flow; tests
/// insert them directly.
async fn seed_request(residency_id: Uuid, title: &str) -> Result<Uuid> {
    let url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new().max_connections(1).connect(&url).await?;

    let id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO maintenance_requests (residency_id, resident_name, unit_number, title)
        VALUES ($1, 'Test Resident', '4B', $2)
        RETURNING id
        "#,
    )
    .bind(residency_id)
    .bind(title)
    .fetch_one(&pool)
    .await?;

    Ok(id)
}

async fn setup_residency(
    client: &reqwest::Client,
    base_url: &str,
    bearer: &str,
) -> Result<Uuid> {
    let res = client
        .post(format!("{}/api/public/register-manager", base_url))
        .header("Authorization", bearer)
        .json(&json!({
            "full_name": "Maintenance Tester",
            "residency_name": "Pinecrest",
            "property_type": "apartment"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = res.json().await?;
    Ok(body["data"]["residency"]["id"].as_str().unwrap().parse()?)
}

async fn put_status(
    client: &reqwest::Client,
    base_url: &str,
    bearer: &str,
    request_id: Uuid,
    status: &str,
) -> Result<reqwest::Response> {
    Ok(client
        .put(format!("{}/api/manager/maintenance/{}/status", base_url, request_id))
        .header("Authorization", bearer)
        .json(&json!({ "status": status }))
        .send()
        .await?)
}

#[tokio::test]
async fn status_machine_enforces_transition_table() -> Result<()> {
    if !common::env_ready() {
        eprintln!("skipping: DATABASE_URL/JWT_SECRET not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let bearer = common::bearer_for(&unique_subject(), "maint@example.com")?;

    let residency_id = setup_residency(&client, &server.base_url, &bearer).await?;
    let request_id = seed_request(residency_id, "Leaking faucet").await?;

    // pending -> completed skips in_progress and must fail
    let res = put_status(&client, &server.base_url, &bearer, request_id, "completed").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // unknown status fails regardless of current state
    let res = put_status(&client, &server.base_url, &bearer, request_id, "done").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // pending -> in_progress is legal
    let res = put_status(&client, &server.base_url, &bearer, request_id, "in_progress").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"], "in_progress");

    // in_progress -> completed is legal and terminal
    let res = put_status(&client, &server.base_url, &bearer, request_id, "completed").await?;
    assert_eq!(res.status(), StatusCode::OK);

    // completed -> anything must fail
    let res = put_status(&client, &server.base_url, &bearer, request_id, "cancelled").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn foreign_manager_cannot_touch_requests() -> Result<()> {
    if !common::env_ready() {
        eprintln!("skipping: DATABASE_URL/JWT_SECRET not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let owner = common::bearer_for(&unique_subject(), "owner@example.com")?;
    let stranger = common::bearer_for(&unique_subject(), "stranger@example.com")?;

    let residency_id = setup_residency(&client, &server.base_url, &owner).await?;
    let request_id = seed_request(residency_id, "Broken gate").await?;

    let res = put_status(&client, &server.base_url, &stranger, request_id, "in_progress").await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The request is untouched for the owner
    let res = client
        .get(format!(
            "{}/api/manager/residencies/{}/maintenance?status=pending",
            server.base_url, residency_id
        ))
        .header("Authorization", &owner)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn status_filter_rejects_unknown_values() -> Result<()> {
    if !common::env_ready() {
        eprintln!("skipping: DATABASE_URL/JWT_SECRET not configured");
        return Ok(());
    }

    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let bearer = common::bearer_for(&unique_subject(), "filter@example.com")?;

    let residency_id = setup_residency(&client, &server.base_url, &bearer).await?;

    let res = client
        .get(format!(
            "{}/api/manager/residencies/{}/maintenance?status=bogus",
            server.base_url, residency_id
        ))
        .header("Authorization", &bearer)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
