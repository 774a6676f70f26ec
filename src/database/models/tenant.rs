use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A client organization. All end-user data hangs off a tenant and is only
/// reachable through its API key.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tenant {
    pub id: i32,
    pub company_name: String,
    pub api_key: String,
    pub created_at: DateTime<Utc>,
}

/// Issue a fresh bearer credential for a new tenant
pub fn new_api_key() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_keys_are_unique() {
        assert_ne!(new_api_key(), new_api_key());
    }
}
