//! Client configuration loaded from environment variables.

const DEFAULT_ORIGIN: &str = "https://larek-api.nomoreparties.co";

/// Log output format for the terminal front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Client configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `API_ORIGIN`: backend origin (default: `"https://larek-api.nomoreparties.co"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
#[derive(Debug, Clone)]
pub struct Config {
    pub api_origin: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self {
            api_origin: std::env::var("API_ORIGIN")
                .map(|origin| origin.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_ORIGIN.to_string()),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            log_format: std::env::var("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(LogFormat::Text),
        }
    }

    /// Returns the base URL of the shop API.
    pub fn api_url(&self) -> String {
        format!("{}/api/weblarek", self.api_origin)
    }

    /// Returns the base URL product images are served from.
    pub fn cdn_url(&self) -> String {
        format!("{}/content/weblarek", self.api_origin)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_origin: DEFAULT_ORIGIN.to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}
