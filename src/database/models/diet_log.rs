use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One logged meal. Macro columns are flattened from the optional nested
/// macros object in the request payload.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DietLog {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub meal_name: String,
    pub food_items: Option<String>,
    pub calories: Option<i32>,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    #[serde(rename = "date")]
    pub logged_at: DateTime<Utc>,
}
