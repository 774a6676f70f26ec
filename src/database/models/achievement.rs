use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Achievement {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub unlocked_at: DateTime<Utc>,
}
