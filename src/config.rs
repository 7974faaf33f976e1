use crate::infrastructure::providers::DEFAULT_SENDGRID_BASE_URL;
use std::env;

/// Default upload limit for a translate request (10 MiB)
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub sendgrid_base_url: String,
    pub sendgrid_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub antiforgery_enabled: bool,
    pub antiforgery_secret: Option<String>,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 3000,
            sendgrid_base_url: DEFAULT_SENDGRID_BASE_URL.to_string(),
            sendgrid_timeout_secs: 30,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            antiforgery_enabled: true,
            antiforgery_secret: None,
            otel_exporter_endpoint: None,
            service_name: "template-translator".to_string(),
            metrics_port: 9000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let server_host = env::var("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match env::var("SERVER_PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidPort(value))?,
            Err(_) => defaults.server_port,
        };

        let sendgrid_base_url =
            env::var("SENDGRID_BASE_URL").unwrap_or(defaults.sendgrid_base_url);

        let sendgrid_timeout_secs = parse_number("SENDGRID_TIMEOUT_SECS")?
            .unwrap_or(defaults.sendgrid_timeout_secs);

        let max_upload_bytes =
            parse_number("MAX_UPLOAD_BYTES")?.unwrap_or(defaults.max_upload_bytes);

        let antiforgery_enabled = match env::var("ANTIFORGERY_ENABLED") {
            Ok(value) => parse_bool(&value)
                .ok_or_else(|| ConfigError::InvalidBool("ANTIFORGERY_ENABLED", value))?,
            Err(_) => defaults.antiforgery_enabled,
        };

        let antiforgery_secret = env::var("ANTIFORGERY_SECRET")
            .ok()
            .filter(|s| !s.is_empty());

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or(defaults.service_name);

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidPort(value))?,
            Err(_) => defaults.metrics_port,
        };

        Ok(Config {
            server_host,
            server_port,
            sendgrid_base_url,
            sendgrid_timeout_secs,
            max_upload_bytes,
            antiforgery_enabled,
            antiforgery_secret,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber(name, value)),
        Err(_) => Ok(None),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(String),

    #[error("{0} must be a number, got {1:?}")]
    InvalidNumber(&'static str, String),

    #[error("{0} must be true or false, got {1:?}")]
    InvalidBool(&'static str, String),
}
