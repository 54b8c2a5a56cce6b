//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::surveillance::{DateRange, GeneratorConfig, SamplingProfile, SurveillanceResult};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Synthetic dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_records")]
    pub records: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Last day of the historical window
    #[serde(default = "default_window_end")]
    pub window_end: NaiveDate,

    #[serde(default = "default_window_days")]
    pub window_days: u32,

    #[serde(default)]
    pub profile: SamplingProfile,
}

fn default_records() -> usize {
    500
}

fn default_seed() -> u64 {
    42
}

fn default_window_end() -> NaiveDate {
    DateRange::default().end
}

fn default_window_days() -> u32 {
    365
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            records: default_records(),
            seed: default_seed(),
            window_end: default_window_end(),
            window_days: default_window_days(),
            profile: SamplingProfile::default(),
        }
    }
}

impl DatasetConfig {
    /// Generator settings for this dataset
    pub fn generator_config(&self) -> SurveillanceResult<GeneratorConfig> {
        Ok(GeneratorConfig {
            window: DateRange::ending(self.window_end, self.window_days)?,
            profile: self.profile,
        })
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Largest page `/records` will return
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8090
}

fn default_max_page_size() -> usize {
    1000
}

fn default_enable_export() -> bool {
    true
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_page_size: default_max_page_size(),
            enable_export: default_enable_export(),
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
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

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the configured level.
    pub fn init(&self) {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!("wildwatch={},tower_http=debug", self.level).into()
        });

        let registry = tracing_subscriber::registry().with(filter);

        if self.format.eq_ignore_ascii_case("json") {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        } else {
            registry.with(tracing_subscriber::fmt::layer()).init();
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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

    /// Load from `WILDWATCH_CONFIG`, the default locations, or environment only
    pub fn load_default() -> Self {
        let mut config_paths = vec![std::env::var("WILDWATCH_CONFIG").ok().map(PathBuf::from)];
        config_paths.extend([
            dirs::config_dir().map(|p| p.join("wildwatch").join("config.toml")),
            Some(PathBuf::from("/etc/wildwatch/config.toml")),
            Some(PathBuf::from("./wildwatch.toml")),
        ]);

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Dataset overrides
        if let Some(records) = env_parse("WILDWATCH_RECORDS") {
            self.dataset.records = records;
        }
        if let Some(seed) = env_parse("WILDWATCH_SEED") {
            self.dataset.seed = seed;
        }
        if let Ok(end) = std::env::var("WILDWATCH_WINDOW_END") {
            match crate::surveillance::parse_date(&end) {
                Ok(date) => self.dataset.window_end = date,
                Err(e) => tracing::warn!("Ignoring WILDWATCH_WINDOW_END: {}", e),
            }
        }
        if let Some(days) = env_parse("WILDWATCH_WINDOW_DAYS") {
            self.dataset.window_days = days;
        }
        if let Some(profile) = env_parse("WILDWATCH_PROFILE") {
            self.dataset.profile = profile;
        }

        // API overrides
        if let Ok(host) = std::env::var("WILDWATCH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = env_parse("WILDWATCH_API_PORT") {
            self.api.port = port;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("WILDWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("WILDWATCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring {}: cannot parse {:?}", key, raw);
            None
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
    r#"# Wildlife Health Watch Configuration
#
# Environment variables override these settings:
# - WILDWATCH_RECORDS
# - WILDWATCH_SEED
# - WILDWATCH_WINDOW_END
# - WILDWATCH_WINDOW_DAYS
# - WILDWATCH_PROFILE
# - WILDWATCH_API_HOST
# - WILDWATCH_API_PORT
# - WILDWATCH_LOG_LEVEL
# - WILDWATCH_LOG_FORMAT

[dataset]
# Number of synthetic surveillance records
records = 500

# RNG seed; the same seed always yields the same dataset
seed = 42

# Last day of the historical window (YYYY-MM-DD) and its length in days
window_end = "2024-12-31"
window_days = 365

# Sampling profile: uniform, or field (species abundance + seasonal syndromes)
profile = "uniform"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8090

# Allowed CORS origins (empty = any)
cors_origins = []

# Largest page returned by /api/v1/records
max_page_size = 1000

# Enable the /api/v1/export endpoint
enable_export = true

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_round_trips() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();

        assert_eq!(config.dataset.records, 500);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.dataset.window_days, 365);
        assert_eq!(config.dataset.profile, SamplingProfile::Uniform);
        assert_eq!(config.api.port, 8090);
        assert_eq!(config.logging.format, "pretty");

        let generator = config.dataset.generator_config().unwrap();
        assert_eq!(generator.window, DateRange::default());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[dataset]\nrecords = 1200\nprofile = \"field\"\nwindow_end = \"2023-06-30\"\n\n[api]\nport = 9000"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.dataset.records, 1200);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.dataset.profile, SamplingProfile::Field);
        assert_eq!(
            config.dataset.window_end,
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()
        );
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.api.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/wildwatch.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[dataset]\nrecords = \"many\"").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_zero_day_window_is_rejected() {
        let config = DatasetConfig {
            window_days: 0,
            ..Default::default()
        };
        assert!(config.generator_config().is_err());
    }

    #[test]
    fn test_oversized_window_is_rejected() {
        let config = DatasetConfig {
            window_days: u32::MAX,
            ..Default::default()
        };
        assert!(config.generator_config().is_err());
    }

    #[test]
    fn test_api_addr() {
        assert_eq!(ApiConfig::new("127.0.0.1", 3000).addr(), "127.0.0.1:3000");
    }
}
