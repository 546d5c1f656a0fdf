pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state. The pool is the only shared resource; it is
/// passed explicitly into every operation.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .merge(public_routes())
        .merge(manager_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::public;

    Router::new()
        // Registration needs a verified identity even though it lives under
        // the public prefix
        .route(
            "/api/public/register-manager",
            post(public::register_manager_post)
                .route_layer(axum::middleware::from_fn(middleware::require_identity)),
        )
        // Informational content for end-users, keyed by access code or
        // residency id
        .route("/api/public/template/:access_code", get(public::template_by_code_get))
        .route("/api/public/residencies/:id/faqs", get(public::faqs_get))
}

fn manager_routes() -> Router<AppState> {
    use axum::routing::{patch, post, put};
    use handlers::manager;

    Router::new()
        .route(
            "/api/manager/residencies",
            get(manager::residencies_get).post(manager::residencies_post),
        )
        .route(
            "/api/manager/residencies/:id",
            patch(manager::residency_patch).delete(manager::residency_delete),
        )
        .route(
            "/api/manager/residencies/:id/maintenance",
            get(manager::residency_maintenance_get),
        )
        .route("/api/manager/maintenance", get(manager::maintenance_get))
        .route(
            "/api/manager/maintenance/:id/status",
            put(manager::maintenance_status_update).patch(manager::maintenance_status_update),
        )
        .route(
            "/api/manager/residencies/:id/template",
            get(manager::template_get),
        )
        .route(
            "/api/manager/residencies/:id/template-items",
            post(manager::template_items_post),
        )
        .route(
            "/api/manager/template-items/:id",
            patch(manager::template_item_patch),
        )
        .route("/api/manager/residencies/:id/faqs", post(manager::faqs_post))
        .route("/api/manager/faqs/:id", patch(manager::faq_patch))
        .route_layer(axum::middleware::from_fn(middleware::require_identity))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "ResiLink API",
            "version": version,
            "description": "Property management backend with scoped manager access",
            "endpoints": {
                "home": "/ (public)",
                "health": "/api/health (public)",
                "public": "/api/public/template/:accessCode, /api/public/residencies/:id/faqs",
                "registration": "/api/public/register-manager (verified identity required)",
                "manager": "/api/manager/* (verified identity required)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::health_check(&state.pool).await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
