use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
}

/// Credentials and tuning for the external generative-AI service.
/// Passed into `PlannerService` explicitly rather than read ambiently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

const DEFAULT_PLANNER_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_PLANNER_MODEL: &str = "gemini-1.5-flash";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Environment picks the defaults, specific env vars override
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }

        if let Ok(v) = env::var("GEMINI_API_KEY") {
            if !v.is_empty() {
                self.planner.api_key = Some(v);
            }
        }
        if let Ok(v) = env::var("PLANNER_BASE_URL") {
            self.planner.base_url = v;
        }
        if let Ok(v) = env::var("PLANNER_MODEL") {
            self.planner.model = v;
        }
        if let Ok(v) = env::var("PLANNER_REQUEST_TIMEOUT_SECS") {
            self.planner.request_timeout_secs =
                v.parse().unwrap_or(self.planner.request_timeout_secs);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 10, connection_timeout_secs: 30 },
            planner: PlannerConfig {
                api_key: None,
                base_url: DEFAULT_PLANNER_BASE_URL.to_string(),
                model: DEFAULT_PLANNER_MODEL.to_string(),
                request_timeout_secs: 30,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 20, connection_timeout_secs: 10 },
            planner: PlannerConfig {
                api_key: None,
                base_url: DEFAULT_PLANNER_BASE_URL.to_string(),
                model: DEFAULT_PLANNER_MODEL.to_string(),
                request_timeout_secs: 30,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig { port: 3000 },
            database: DatabaseConfig { max_connections: 50, connection_timeout_secs: 5 },
            planner: PlannerConfig {
                api_key: None,
                base_url: DEFAULT_PLANNER_BASE_URL.to_string(),
                model: DEFAULT_PLANNER_MODEL.to_string(),
                request_timeout_secs: 20,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.max_connections, 10);
        assert!(config.planner.api_key.is_none());
        assert_eq!(config.planner.model, DEFAULT_PLANNER_MODEL);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert_eq!(config.planner.request_timeout_secs, 20);
    }
}
