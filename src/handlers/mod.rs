pub mod achievements;
pub mod body_metrics;
pub mod diet;
pub mod register;
pub mod workouts;

use axum::{middleware, routing::get, routing::post, Router};

use crate::middleware::api_key_auth;
use crate::middleware::AuthTenant;

use crate::database::manager::DatabaseManager;
use crate::database::models::User;
use crate::database::repository::users;
use crate::error::ApiError;

/// All tenant-facing routes, behind the API-key gate
pub fn router() -> Router {
    Router::new()
        .route("/register", post(register::register))
        .route("/generate-plan", post(diet::generate_plan))
        .route("/log", post(diet::log_meal))
        .route("/:user_id/logs", get(diet::get_logs))
        .route("/:user_id/weekly-summary", get(diet::weekly_summary))
        .route("/:user_id/plans", get(diet::get_plans))
        .route("/workouts", post(workouts::log_workout))
        .route("/:user_id/workouts", get(workouts::get_workouts))
        .route("/weight", post(body_metrics::log_weight))
        .route("/:user_id/weight-history", get(body_metrics::get_weight_history))
        .route("/measurements", post(body_metrics::log_measurements))
        .route("/:user_id/measurements", get(body_metrics::get_measurements))
        .route("/:user_id/achievements", get(achievements::get_achievements))
        .layer(middleware::from_fn(api_key_auth))
}

/// Resolve a user id against the authenticated tenant. A user owned by a
/// different tenant is indistinguishable from a missing one.
pub(crate) async fn require_owned_user(
    tenant: &AuthTenant,
    user_id: i32,
) -> Result<User, ApiError> {
    let pool = DatabaseManager::pool().await?;
    users::find_owned(&pool, tenant.id, user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found or does not belong to this client"))
}
