use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub roster: RosterConfig,
    /// Present only when both endpoint and API key are set.
    pub llm: Option<LlmConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let csv_path = env::var("APP_ROSTER_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let as_of = match env::var("APP_ROSTER_AS_OF") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| ConfigError::InvalidAsOfDate { value: raw })?,
            ),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            roster: RosterConfig { csv_path, as_of },
            llm: LlmConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the in-memory roster is seeded from and the date tenure is measured against.
#[derive(Debug, Clone, Default)]
pub struct RosterConfig {
    pub csv_path: Option<PathBuf>,
    pub as_of: Option<NaiveDate>,
}

/// Chat-completions deployment used for narratives and the assistant chat.
#[derive(Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub const DEFAULT_DEPLOYMENT: &'static str = "gpt-4.1-mini";
    pub const DEFAULT_API_VERSION: &'static str = "2024-12-01-preview";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    fn from_env() -> Result<Option<Self>, ConfigError> {
        let endpoint = non_blank_var("APP_LLM_ENDPOINT");
        let api_key = non_blank_var("APP_LLM_API_KEY");

        let (endpoint, api_key) = match (endpoint, api_key) {
            (None, None) => return Ok(None),
            (Some(endpoint), Some(api_key)) => (endpoint, api_key),
            _ => return Err(ConfigError::IncompleteLlmSettings),
        };

        let timeout_secs = match non_blank_var("APP_LLM_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::InvalidLlmTimeout { value: raw })?,
            None => Self::DEFAULT_TIMEOUT_SECS,
        };

        Ok(Some(Self {
            endpoint,
            api_key,
            deployment: non_blank_var("APP_LLM_DEPLOYMENT")
                .unwrap_or_else(|| Self::DEFAULT_DEPLOYMENT.to_string()),
            api_version: non_blank_var("APP_LLM_API_VERSION")
                .unwrap_or_else(|| Self::DEFAULT_API_VERSION.to_string()),
            timeout_secs,
        }))
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment", &self.deployment)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn non_blank_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAsOfDate { value: String },
    IncompleteLlmSettings,
    InvalidLlmTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAsOfDate { value } => {
                write!(f, "APP_ROSTER_AS_OF must be YYYY-MM-DD (got '{value}')")
            }
            ConfigError::IncompleteLlmSettings => {
                write!(f, "APP_LLM_ENDPOINT and APP_LLM_API_KEY must be set together")
            }
            ConfigError::InvalidLlmTimeout { value } => {
                write!(f, "APP_LLM_TIMEOUT_SECS must be a positive integer (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidAsOfDate { .. }
            | ConfigError::IncompleteLlmSettings
            | ConfigError::InvalidLlmTimeout { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
