//! Shared application state and configuration

use sales_model::ModelSpec;
use std::collections::HashMap;
use std::env;

/// A known user in the fixed credential set.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub password: String,
    pub display_name: String,
}

/// Runtime configuration, read from the environment with compiled
/// defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub sales_data_path: String,
    pub detail_data_path: String,
    /// Username → credentials.
    pub users: HashMap<String, UserRecord>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut users = HashMap::new();
        users.insert(
            "admin".to_string(),
            UserRecord {
                password: env::var("SALES_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "admin123".to_string()),
                display_name: "Sales Admin".to_string(),
            },
        );

        Self {
            bind_addr: env::var("SALES_BIND_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:3000".to_string()),
            sales_data_path: env::var("SALES_DATA_PATH")
                .unwrap_or_else(|_| "data/sales.csv".to_string()),
            detail_data_path: env::var("SALES_DETAIL_PATH")
                .unwrap_or_else(|_| "data/sales_detail.csv".to_string()),
            users,
        }
    }
}

/// State shared across request handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: AppConfig,
    pub spec: ModelSpec,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            spec: ModelSpec::bakery(),
        }
    }
}
