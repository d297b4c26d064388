use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the recipe lookup service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. `None` means no timeout: fail fast on
    /// transport errors only, matching the upstream reference behavior.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Attempts per search/filter request before giving up
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds (scales linearly with attempt)
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Maximum number of detail lookups per category listing
    #[serde(default = "default_detail_cap")]
    pub detail_cap: usize,
    /// Cuisine used by the fallback-of-last-resort branch
    #[serde(default = "default_cuisine")]
    pub default_cuisine: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
            detail_cap: default_detail_cap(),
            default_cuisine: default_cuisine(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_retry_attempts() -> u32 {
    1
}

fn default_retry_delay_ms() -> u64 {
    250
}

fn default_detail_cap() -> usize {
    18
}

fn default_cuisine() -> String {
    "Indian".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with DISHDIVE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: DISHDIVE__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("DISHDIVE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
