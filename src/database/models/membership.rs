use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// At most one membership per user; removed with the user (cascade).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Membership {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub plan: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}
