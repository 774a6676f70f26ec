use axum::{
    extract::rejection::JsonRejection,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::repository::workouts;
use crate::error::ApiError;
use crate::middleware::AuthTenant;

use super::require_owned_user;

#[derive(Debug, Deserialize, Validate)]
pub struct WorkoutRequest {
    #[validate(range(min = 1, message = "A valid user id is required"))]
    pub user_id: i32,

    #[validate(length(min = 1, max = 150, message = "Workout name must be between 1 and 150 characters"))]
    pub name: String,

    #[validate]
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExercisePayload {
    #[validate(length(min = 1, max = 150, message = "Exercise name must be between 1 and 150 characters"))]
    pub name: String,

    #[validate(range(min = 1, message = "Sets must be at least 1"))]
    pub sets: i32,

    #[validate(range(min = 1, message = "Reps must be at least 1"))]
    pub reps: i32,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,
}

/// POST /workouts - create a workout with its exercise entries atomically
pub async fn log_workout(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<WorkoutRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = require_owned_user(&tenant, payload.user_id).await?;

    let exercises = payload
        .exercises
        .into_iter()
        .map(|e| workouts::NewExercise { name: e.name, sets: e.sets, reps: e.reps, weight: e.weight })
        .collect();

    let pool = DatabaseManager::pool().await?;
    let workout =
        workouts::create_with_exercises(&pool, tenant.id, user.id, &payload.name, exercises)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Workout logged successfully!",
            "workout": workout
        })),
    ))
}

/// GET /:user_id/workouts - workouts with nested exercises, newest first
pub async fn get_workouts(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let workouts = workouts::list_with_exercises(&pool, tenant.id, user.id).await?;
    Ok(Json(workouts))
}
