pub mod diet_planner;
pub mod reporting;
