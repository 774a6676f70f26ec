use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WeightEntry {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub weight_kg: f64,
    #[serde(rename = "date")]
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MeasurementLog {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub waist_cm: Option<f64>,
    pub chest_cm: Option<f64>,
    pub arms_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    #[serde(rename = "date")]
    pub logged_at: DateTime<Utc>,
}
