use dotenv::dotenv;
use std::env;
use thiserror::Error;

pub const DEFAULT_MONGO_HOST: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "technoboltpets";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";

/// Ordered fallback list; the first model that answers wins.
pub const DEFAULT_GEMINI_MODELS: [&str; 4] = [
    "models/gemini-3-flash-preview",
    "models/gemini-2.5-flash",
    "models/gemini-2.0-flash",
    "models/gemini-flash-latest",
];

/// Number of `GEMINI_CHAVE_n` slots scanned for API keys.
const GEMINI_KEY_SLOTS: usize = 7;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub mongo_host: String,
    pub mongo_user: Option<String>,
    pub mongo_pass: Option<String>,
    pub database_name: String,
    pub gemini_keys: Vec<String>,
    pub gemini_models: Vec<String>,
    pub gemini_base_url: String,
    pub secret_key: String,
    pub bind_address: String,
    pub admin_user: Option<String>,
    pub admin_pass: Option<String>,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl AppConfig {

    pub fn from_env() -> Result<AppConfig, ConfigError> {
        dotenv().ok();

        let gemini_keys = (1..=GEMINI_KEY_SLOTS)
            .filter_map(|slot| non_empty_var(&format!("GEMINI_CHAVE_{}", slot)))
            .collect();

        let gemini_models = match non_empty_var("GEMINI_MODELS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|model| !model.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_GEMINI_MODELS.iter().map(|model| model.to_string()).collect(),
        };

        Ok(AppConfig {
            mongo_host: non_empty_var("MONGO_HOST").unwrap_or_else(|| DEFAULT_MONGO_HOST.to_string()),
            mongo_user: non_empty_var("MONGO_USER"),
            mongo_pass: non_empty_var("MONGO_PASS"),
            database_name: non_empty_var("MONGO_DB").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            gemini_keys,
            gemini_models,
            gemini_base_url: non_empty_var("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            secret_key: non_empty_var("SECRET_KEY").ok_or(ConfigError::Missing("SECRET_KEY"))?,
            bind_address: non_empty_var("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            admin_user: non_empty_var("ADMIN_USER"),
            admin_pass: non_empty_var("ADMIN_PASS"),
        })
    }

    /// Bare Atlas hosts are expanded to an SRV connection string.
    pub fn mongo_uri(&self) -> String {
        let host = self.mongo_host.trim();
        if host.starts_with("mongodb://") || host.starts_with("mongodb+srv://") {
            host.to_string()
        } else {
            format!("mongodb+srv://{}/?appName=Cluster0", host)
        }
    }

    pub fn mongo_credentials(&self) -> Option<(String, String)> {
        match (&self.mongo_user, &self.mongo_pass) {
            (Some(user), Some(pass)) => Some((user.clone(), pass.clone())),
            _ => None,
        }
    }
}
