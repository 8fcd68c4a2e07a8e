use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;

use crate::models::device::MAX_COST_PER_KWH;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub devices: DevicesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Origins allowed to call the API from a browser. Empty means any origin.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DevicesConfig {
    /// Tariff applied to devices created or replaced without an explicit `cost_per_kwh`
    #[serde(default = "default_cost_per_kwh")]
    pub default_cost_per_kwh: f64,
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            default_cost_per_kwh: default_cost_per_kwh(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "compact" or "full"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

fn default_cost_per_kwh() -> f64 {
    1.13
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "compact".into()
}

impl Config {
    /// Load configuration from the file named by `APP_CONFIG`, with environment variable substitution.
    /// `DATABASE_URL`, when set, overrides `database.url`.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var("APP_CONFIG").unwrap_or_else(|_| "config/config.yaml".to_string());

        let config_content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;

        let mut config = Self::from_yaml_str(&config_content)?;

        if let Ok(url) = env::var("DATABASE_URL") {
            config.database.url = url;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let config_content = substitute_env_vars(raw)?;
        let config: Config =
            serde_yaml::from_str(&config_content).context("Failed to parse config YAML")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let tariff = self.devices.default_cost_per_kwh;
        anyhow::ensure!(
            (0.0..=MAX_COST_PER_KWH).contains(&tariff),
            "devices.default_cost_per_kwh must be between 0 and {}",
            MAX_COST_PER_KWH
        );
        anyhow::ensure!(
            self.database.min_connections <= self.database.max_connections,
            "database.min_connections must not exceed database.max_connections"
        );
        anyhow::ensure!(
            self.logging.format == "compact" || self.logging.format == "full",
            "logging.format must be 'compact' or 'full'"
        );
        Ok(())
    }

    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    pub fn api_bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Substitute environment variables in format $(VAR_NAME)
fn substitute_env_vars(content: &str) -> Result<String> {
    let mut result = content.to_string();
    let re = regex::Regex::new(r"\$\(([A-Z0-9_]+)\)").context("Invalid placeholder pattern")?;

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        let var_value = env::var(var_name)
            .with_context(|| format!("Environment variable {} not set", var_name))?;
        result = result.replace(&format!("$({})", var_name), &var_value);
    }

    Ok(result)
}
