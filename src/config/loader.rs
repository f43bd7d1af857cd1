//! Configuration structures and loading logic.

use crate::api::{API_BASE, PAGE_SIZE};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub network: NetworkConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Which account to download.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Numeric user ID or profile link.
    #[serde(default)]
    pub uid: Option<String>,
}

/// HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// userPost listing endpoint.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Retries for HTTP 500/502/503/504.
    #[serde(default = "default_transport_retries")]
    pub transport_retries: u32,

    /// Initial backoff before a status retry.
    #[serde(default = "default_backoff_base")]
    pub backoff_base_ms: u64,

    /// Backoff ceiling.
    #[serde(default = "default_backoff_max")]
    pub backoff_max_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            transport_retries: default_transport_retries(),
            backoff_base_ms: default_backoff_base(),
            backoff_max_ms: default_backoff_max(),
        }
    }
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// Posts requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Download attempts per image.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Pause between listing pages.
    #[serde(default = "default_page_delay")]
    pub page_delay_ms: u64,

    /// Pause after every image.
    #[serde(default = "default_image_delay")]
    pub image_delay_ms: u64,

    /// Pause between failed download attempts.
    #[serde(default = "default_retry_delay")]
    pub retry_delay_ms: u64,

    /// Walk all pages once to count posts before downloading.
    #[serde(default)]
    pub count_posts_first: bool,

    /// Log images skipped because they already exist.
    #[serde(default)]
    pub show_skipped: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            page_size: default_page_size(),
            max_retries: default_max_retries(),
            page_delay_ms: default_page_delay(),
            image_delay_ms: default_image_delay(),
            retry_delay_ms: default_retry_delay(),
            count_posts_first: false,
            show_skipped: false,
        }
    }
}

/// Pacing between requests.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub page_delay: Duration,
    pub image_delay: Duration,
    pub retry_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        OptionsConfig::default().pacing()
    }
}

impl OptionsConfig {
    pub fn pacing(&self) -> Pacing {
        Pacing {
            page_delay: Duration::from_millis(self.page_delay_ms),
            image_delay: Duration::from_millis(self.image_delay_ms),
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

fn default_api_base_url() -> String {
    API_BASE.to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_transport_retries() -> u32 {
    3
}

fn default_backoff_base() -> u64 {
    500
}

fn default_backoff_max() -> u64 {
    10_000
}

fn default_page_size() -> u32 {
    PAGE_SIZE
}

fn default_max_retries() -> u32 {
    3
}

fn default_page_delay() -> u64 {
    1000
}

fn default_image_delay() -> u64 {
    500
}

fn default_retry_delay() -> u64 {
    1000
}

/// Folder used when no download directory is configured.
const DEFAULT_DOWNLOAD_FOLDER: &str = "mys-downloads";

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options.download_directory.clone().unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(DEFAULT_DOWNLOAD_FOLDER)
        })
    }
}
