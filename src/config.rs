use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::Endpoint;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub webhooks: WebhooksConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Automation backend endpoints.
///
/// Each endpoint is a path relative to `base_url`, or an absolute URL that
/// replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhooksConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_initialize_project")]
    pub initialize_project: String,
    #[serde(default = "default_create_script")]
    pub create_script: String,
    #[serde(default = "default_prepare_media")]
    pub prepare_media: String,
    #[serde(default = "default_generate_images")]
    pub generate_images: String,
}

fn default_base_url() -> String {
    "http://localhost:5678/webhook".to_string()
}

fn default_initialize_project() -> String {
    "NewProject_1".to_string()
}

fn default_create_script() -> String {
    "RunPromt".to_string()
}

fn default_prepare_media() -> String {
    "PrepareMedia".to_string()
}

fn default_generate_images() -> String {
    "GenerateImages".to_string()
}

impl Default for WebhooksConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            initialize_project: default_initialize_project(),
            create_script: default_create_script(),
            prepare_media: default_prepare_media(),
            generate_images: default_generate_images(),
        }
    }
}

impl WebhooksConfig {
    /// Configured path (or absolute URL) for an endpoint
    pub fn path_for(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::InitializeProject => &self.initialize_project,
            Endpoint::CreateScript => &self.create_script,
            Endpoint::PrepareMedia => &self.prepare_media,
            Endpoint::GenerateImages => &self.generate_images,
        }
    }

    /// Full URL for an endpoint
    pub fn url_for(&self, endpoint: Endpoint) -> String {
        let path = self.path_for(endpoint);
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw interval of the terminal UI (also the spinner speed)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How long success/error toasts stay on screen
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,
}

fn default_tick_rate() -> u64 {
    100
}

fn default_toast_duration() -> u64 {
    4000 // 4 seconds
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            toast_duration_ms: default_toast_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for podflow's own files (logs). Relative paths resolve
    /// against the working directory.
    #[serde(default = "default_state_path")]
    pub state: String,
}

fn default_state_path() -> String {
    ".podflow".to_string()
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state: default_state_path(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Raise a desktop notification when image generation finishes
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub sound: bool,
}

impl Config {
    /// Project-local config file, checked in the working directory
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("podflow.toml")
    }

    /// Per-user config file (`~/.config/podflow/config.toml` on Linux)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("podflow").join("config.toml"))
    }

    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so podflow works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        // User config (global overrides)
        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Project-local config
        let local_config = Self::local_config_path();
        if local_config.exists() {
            builder = builder.add_source(config::File::from(local_config));
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment variables, e.g. PODFLOW__WEBHOOKS__BASE_URL
        builder = builder.add_source(
            config::Environment::with_prefix("PODFLOW")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }

    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}
