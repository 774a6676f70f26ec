use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkoutLog {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub user_id: i32,
    pub name: String,
    #[serde(rename = "date")]
    pub logged_at: DateTime<Utc>,
}

/// Exercise line item; cascade-deleted with its workout. Rows are returned
/// in insertion order (ascending id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExerciseEntry {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    #[serde(skip_serializing)]
    pub workout_log_id: i32,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

/// Response shape for workout listings: the log with its exercises nested
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub workout: WorkoutLog,
    pub exercises: Vec<ExerciseEntry>,
}
