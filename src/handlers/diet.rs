use axum::{
    extract::rejection::JsonRejection,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::repository::{diet_logs, plan_records};
use crate::error::ApiError;
use crate::middleware::AuthTenant;
use crate::services::diet_planner::PlannerService;
use crate::services::reporting;

use super::require_owned_user;

#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePlanRequest {
    #[validate(range(min = 1, message = "A valid user id is required"))]
    pub user_id: i32,

    /// Free-form survey answers, forwarded to the planner verbatim
    #[serde(flatten)]
    pub answers: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DietLogRequest {
    #[validate(range(min = 1, message = "A valid user id is required"))]
    pub user_id: i32,

    #[validate(length(min = 1, max = 100, message = "Meal name must be between 1 and 100 characters"))]
    pub meal_name: String,

    pub food_items: Option<String>,

    #[validate(range(min = 0, message = "Calories cannot be negative"))]
    pub calories: Option<i32>,

    #[validate]
    pub macros: Option<MacrosPayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MacrosPayload {
    #[validate(range(min = 0.0, message = "Protein cannot be negative"))]
    pub protein_g: Option<f64>,
    #[validate(range(min = 0.0, message = "Carbs cannot be negative"))]
    pub carbs_g: Option<f64>,
    #[validate(range(min = 0.0, message = "Fat cannot be negative"))]
    pub fat_g: Option<f64>,
}

/// POST /generate-plan - produce an AI diet plan from the user's profile and
/// survey answers, storing the result as a plan record
pub async fn generate_plan(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<GeneratePlanRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = require_owned_user(&tenant, payload.user_id).await?;

    let planner = PlannerService::new(&config::config().planner)?;
    let form = Value::Object(payload.answers);
    let plan = planner.generate_plan(&user, &form).await?;

    let pool = DatabaseManager::pool().await?;
    plan_records::insert(&pool, tenant.id, user.id, &plan).await?;

    tracing::info!("Generated diet plan for user {} (tenant {})", user.id, tenant.id);

    Ok(Json(plan))
}

/// POST /log - record a meal for a tenant-owned user, flattening the
/// optional macros object into columns
pub async fn log_meal(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<DietLogRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = require_owned_user(&tenant, payload.user_id).await?;

    let macros = payload.macros.unwrap_or(MacrosPayload {
        protein_g: None,
        carbs_g: None,
        fat_g: None,
    });

    let pool = DatabaseManager::pool().await?;
    let log = diet_logs::insert(
        &pool,
        tenant.id,
        user.id,
        diet_logs::NewDietLog {
            meal_name: payload.meal_name,
            food_items: payload.food_items,
            calories: payload.calories,
            protein_g: macros.protein_g,
            carbs_g: macros.carbs_g,
            fat_g: macros.fat_g,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Meal logged successfully!",
            "log": log
        })),
    ))
}

/// GET /:user_id/logs - meal logs for a tenant-owned user, newest first
pub async fn get_logs(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let logs = diet_logs::list_desc(&pool, tenant.id, user.id).await?;
    Ok(Json(logs))
}

/// GET /:user_id/weekly-summary - aggregate totals over the trailing 7 days
pub async fn weekly_summary(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let summary = reporting::weekly_diet_summary(&pool, tenant.id, user.id).await?;
    Ok(Json(summary))
}

/// GET /:user_id/plans - previously generated plan documents, newest first
pub async fn get_plans(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let plans = plan_records::list_desc(&pool, tenant.id, user.id).await?;
    Ok(Json(plans))
}
