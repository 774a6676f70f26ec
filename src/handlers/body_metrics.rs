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
use crate::database::repository::{measurements, weight_entries};
use crate::error::ApiError;
use crate::middleware::AuthTenant;

use super::require_owned_user;

#[derive(Debug, Deserialize, Validate)]
pub struct WeightRequest {
    #[validate(range(min = 1, message = "A valid user id is required"))]
    pub user_id: i32,

    #[validate(range(min = 1.0, max = 500.0, message = "Weight must be between 1 and 500 kg"))]
    pub weight_kg: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MeasurementRequest {
    #[validate(range(min = 1, message = "A valid user id is required"))]
    pub user_id: i32,

    #[validate(range(min = 0.0, message = "Waist cannot be negative"))]
    pub waist_cm: Option<f64>,
    #[validate(range(min = 0.0, message = "Chest cannot be negative"))]
    pub chest_cm: Option<f64>,
    #[validate(range(min = 0.0, message = "Arms cannot be negative"))]
    pub arms_cm: Option<f64>,
    #[validate(range(min = 0.0, message = "Hips cannot be negative"))]
    pub hips_cm: Option<f64>,
}

/// POST /weight - record a point-in-time body weight
pub async fn log_weight(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<WeightRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = require_owned_user(&tenant, payload.user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let entry = weight_entries::insert(&pool, tenant.id, user.id, payload.weight_kg).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Weight recorded successfully!",
            "entry": entry
        })),
    ))
}

/// GET /:user_id/weight-history - weight entries, newest first
pub async fn get_weight_history(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let history = weight_entries::history_desc(&pool, tenant.id, user.id).await?;
    Ok(Json(history))
}

/// POST /measurements - record body measurements
pub async fn log_measurements(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<MeasurementRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = require_owned_user(&tenant, payload.user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let log = measurements::insert(
        &pool,
        tenant.id,
        user.id,
        measurements::NewMeasurement {
            waist_cm: payload.waist_cm,
            chest_cm: payload.chest_cm,
            arms_cm: payload.arms_cm,
            hips_cm: payload.hips_cm,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Measurements recorded successfully!",
            "log": log
        })),
    ))
}

/// GET /:user_id/measurements - measurement logs, newest first
pub async fn get_measurements(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let logs = measurements::list_desc(&pool, tenant.id, user.id).await?;
    Ok(Json(logs))
}