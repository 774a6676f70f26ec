use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

/// Stored copy of a generated plan document, kept per user so coaches can
/// review what the model produced over time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanRecord {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub generated_plan: Option<Value>,
    pub created_at: DateTime<Utc>,
}
