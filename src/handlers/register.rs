use axum::{
    extract::rejection::JsonRejection,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::database::manager::DatabaseManager;
use crate::database::models::user::derive_username;
use crate::database::repository::users::{self, NewMembership, NewUser};
use crate::error::ApiError;
use crate::middleware::AuthTenant;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    // Username derivation preserves length, so the name is bounded by the
    // narrower username column
    #[validate(length(min = 1, max = 80, message = "Name must be between 1 and 80 characters"))]
    pub name: String,

    #[validate(range(min = 1, max = 120, message = "Age must be between 1 and 120"))]
    pub age: i32,

    #[validate(length(min = 1, max = 20, message = "Gender must be between 1 and 20 characters"))]
    pub gender: String,

    #[validate(length(min = 1, max = 120, message = "Contact info must be between 1 and 120 characters"))]
    pub contact_info: String,

    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub fitness_goals: Option<String>,
    pub workouts_per_week: Option<String>,
    pub workout_duration: Option<i32>,
    pub disliked_foods: Option<String>,
    pub allergies: Option<String>,
    pub health_conditions: Option<String>,
    pub sleep_hours: Option<String>,
    pub stress_level: Option<String>,
    pub activity_level: Option<String>,

    #[validate]
    pub membership: Option<MembershipPayload>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MembershipPayload {
    #[validate(length(min = 1, max = 50, message = "Membership plan must be between 1 and 50 characters"))]
    pub plan: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// POST /register - create an end user (plus optional membership) for the
/// authenticated tenant
pub async fn register(
    Extension(tenant): Extension<AuthTenant>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let username = derive_username(&payload.name);

    let pool = DatabaseManager::pool().await?;
    if users::username_exists(&pool, tenant.id, &username).await? {
        return Err(ApiError::conflict(format!(
            "User with name '{}' already exists for this client",
            payload.name
        )));
    }

    let membership = payload.membership.as_ref().map(|m| NewMembership {
        plan: Some(m.plan.clone()),
        start_date: m.start_date,
        end_date: m.end_date,
    });

    let new_user = NewUser {
        username,
        contact_info: payload.contact_info,
        name: payload.name.clone(),
        age: Some(payload.age),
        gender: Some(payload.gender),
        weight_kg: payload.weight_kg,
        height_cm: payload.height_cm,
        fitness_goals: payload.fitness_goals,
        workouts_per_week: payload.workouts_per_week,
        workout_duration: payload.workout_duration,
        disliked_foods: payload.disliked_foods,
        allergies: payload.allergies,
        health_conditions: payload.health_conditions,
        sleep_hours: payload.sleep_hours,
        stress_level: payload.stress_level,
        activity_level: payload.activity_level,
    };

    let user_id = users::create_with_membership(&pool, tenant.id, new_user, membership).await?;

    tracing::info!("Created user {} for tenant {}", user_id, tenant.company_name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!(
                "User '{}' created successfully for client {}",
                payload.name, tenant.company_name
            ),
            "user_id": user_id
        })),
    ))
}
