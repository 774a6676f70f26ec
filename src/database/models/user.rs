use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// End user of the fitness app, owned by exactly one tenant.
/// Username is derived from the display name at registration time and is
/// unique per tenant, as is the contact value.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    #[serde(skip_serializing)]
    pub tenant_id: i32,
    pub username: String,
    pub contact_info: String,
    pub name: String,
    pub age: Option<i32>,
    pub gender: Option<String>,
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
}

/// Username derivation rule: lowercase display name, spaces to underscores.
/// Two names differing only by case or spacing collide on purpose.
pub fn derive_username(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_username_lowercases_and_underscores() {
        assert_eq!(derive_username("Jane Doe"), "jane_doe");
        assert_eq!(derive_username("jane doe"), "jane_doe");
        assert_eq!(derive_username("JANE  DOE"), "jane__doe");
    }

    #[test]
    fn test_derive_username_no_spaces() {
        assert_eq!(derive_username("Madonna"), "madonna");
    }
}
