use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};

use crate::database::manager::DatabaseManager;
use crate::database::repository::achievements;
use crate::error::ApiError;
use crate::middleware::AuthTenant;

use super::require_owned_user;

/// GET /:user_id/achievements - unlocked milestones, newest first
pub async fn get_achievements(
    Extension(tenant): Extension<AuthTenant>,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let user = require_owned_user(&tenant, user_id).await?;

    let pool = DatabaseManager::pool().await?;
    let unlocked = achievements::list_desc(&pool, tenant.id, user.id).await?;
    Ok(Json(unlocked))
}
