pub mod achievement;
pub mod body_metrics;
pub mod diet_log;
pub mod membership;
pub mod plan_record;
pub mod tenant;
pub mod user;
pub mod workout;

pub use achievement::Achievement;
pub use body_metrics::{MeasurementLog, WeightEntry};
pub use diet_log::DietLog;
pub use membership::Membership;
pub use plan_record::PlanRecord;
pub use tenant::Tenant;
pub use user::User;
pub use workout::{ExerciseEntry, WorkoutLog, WorkoutWithExercises};
