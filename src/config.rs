//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig as ServerApiConfig;
use crate::backend::BackendConfig as ClientBackendConfig;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub locale: LocaleConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Hosted backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    /// Service or anon key; prefer the environment over the config file
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_backend_timeout")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seed the roles table on startup when it is empty
    #[serde(default = "default_auto_seed")]
    pub auto_seed_roles: bool,
}

fn default_backend_url() -> String {
    "http://localhost:54321".to_string()
}

fn default_backend_timeout() -> u64 {
    5000
}

fn default_max_retries() -> u32 {
    3
}

fn default_auto_seed() -> bool {
    false
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            api_key: String::new(),
            request_timeout_ms: default_backend_timeout(),
            max_retries: default_max_retries(),
            auto_seed_roles: default_auto_seed(),
        }
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Localization configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleConfig {
    /// Where the language preference is persisted; platform config dir when
    /// unset
    pub preferences_file: Option<String>,
}

impl LocaleConfig {
    pub fn preferences_path(&self) -> PathBuf {
        self.preferences_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::locale::FilePreferenceStore::default_path)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in search order
    pub fn default_paths() -> Vec<PathBuf> {
        [
            std::env::var("CAREPREP_CONFIG").ok().map(PathBuf::from),
            dirs::config_dir().map(|p| p.join("careprep").join("config.toml")),
            Some(PathBuf::from("/etc/careprep/config.toml")),
            Some(PathBuf::from("./careprep.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load the first existing file among the default locations, or the
    /// environment alone when there is none.
    ///
    /// Returns the file used so the caller can log it once tracing is set
    /// up. A file that exists but cannot be read or parsed is an error.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    fn load_first(candidates: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match candidates.iter().find(|p| p.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Backend overrides
        if let Ok(url) = std::env::var("CAREPREP_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Ok(key) = std::env::var("CAREPREP_BACKEND_KEY") {
            self.backend.api_key = key;
        }
        if let Ok(seed) = std::env::var("CAREPREP_AUTO_SEED_ROLES") {
            self.backend.auto_seed_roles = seed.to_lowercase() != "false" && seed != "0";
        }

        // API overrides
        if let Ok(host) = std::env::var("CAREPREP_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("CAREPREP_API_PORT") {
            if let Ok(p) = port.parse() {
                self.api.port = p;
            }
        }

        // Locale overrides
        if let Ok(file) = std::env::var("CAREPREP_PREFERENCES_FILE") {
            self.locale.preferences_file = Some(file);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("CAREPREP_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CAREPREP_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Settings for the backend REST client
    pub fn backend_client_config(&self) -> ClientBackendConfig {
        ClientBackendConfig {
            base_url: self.backend.url.clone(),
            api_key: self.backend.api_key.clone(),
            request_timeout_ms: self.backend.request_timeout_ms,
            max_retries: self.backend.max_retries,
        }
    }

    /// Settings for the HTTP server
    pub fn server_config(&self) -> ServerApiConfig {
        ServerApiConfig {
            host: self.api.host.clone(),
            port: self.api.port,
            request_timeout_ms: self.api.request_timeout_secs * 1000,
            cors_origins: self.api.cors_origins.clone(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# CarePrep Configuration
#
# Environment variables override these settings:
# - CAREPREP_CONFIG (path of this file)
# - CAREPREP_BACKEND_URL
# - CAREPREP_BACKEND_KEY
# - CAREPREP_AUTO_SEED_ROLES
# - CAREPREP_API_HOST
# - CAREPREP_API_PORT
# - CAREPREP_PREFERENCES_FILE
# - CAREPREP_LOG_LEVEL
# - CAREPREP_LOG_FORMAT

[backend]
# Hosted backend project URL
url = "http://localhost:54321"

# API key (set CAREPREP_BACKEND_KEY instead of committing it here)
api_key = ""

# Request timeout in milliseconds
request_timeout_ms = 5000

# Attempts for requests that cannot reach the backend
max_retries = 3

# Insert the seed roles on startup when the roles table is empty
auto_seed_roles = false

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = permissive)
# cors_origins = ["http://localhost:3000"]
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

[locale]
# Language preference file (default: platform config dir)
# preferences_file = "~/.config/careprep/preferences.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
