//! Configuration management for the book form client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Which source of truth backs the submission actions
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Memory,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FormConfig {
    /// Delay between the success dialog and the hard reset
    pub reload_delay_ms: u64,
    /// Question asked before leaving the form
    pub cancel_prompt: String,
}

impl FormConfig {
    pub fn reload_delay(&self) -> Duration {
        Duration::from_millis(self.reload_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix BOOK_FORM_)
            .add_source(
                Environment::with_prefix("BOOK_FORM")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override backend URL from BOOK_FORM_API_URL env var if present
            .set_override_option("backend.base_url", env::var("BOOK_FORM_API_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

pub const DEFAULT_CANCEL_PROMPT: &str =
    "Apakah Anda yakin ingin kembali? Perubahan data tidak akan tersimpan.";

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            base_url: "http://localhost:8080/api".to_string(),
            timeout_secs: 10,
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            reload_delay_ms: 2000,
            cancel_prompt: DEFAULT_CANCEL_PROMPT.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
