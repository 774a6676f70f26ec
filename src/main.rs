use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use fitcoach_api::database::manager::DatabaseManager;
use fitcoach_api::{config, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, GEMINI_API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting FitCoach API in {:?} mode", config.environment);

    // Apply pending migrations; a down database still lets the server bind so
    // /health can report the degraded state
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("Migrations not applied at startup: {}", e);
    }

    let app = app();

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("FitCoach API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Tenant-facing API (API-key gated)
        .merge(handlers::router())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "FitCoach API",
        "version": version,
        "description": "Multi-tenant fitness coaching backend",
        "endpoints": {
            "health": "/health (public)",
            "register": "POST /register",
            "generate_plan": "POST /generate-plan",
            "log_meal": "POST /log",
            "logs": "GET /:user_id/logs",
            "weekly_summary": "GET /:user_id/weekly-summary",
            "plans": "GET /:user_id/plans",
            "workouts": "POST /workouts, GET /:user_id/workouts",
            "weight": "POST /weight, GET /:user_id/weight-history",
            "measurements": "POST /measurements, GET /:user_id/measurements",
            "achievements": "GET /:user_id/achievements",
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
