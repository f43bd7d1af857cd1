//! Error types for the mys-downloader application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // API errors
    #[error("API error: {0}")]
    Api(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Invalid user ID or profile link: '{0}'")]
    InvalidIdentifier(String),

    // Network errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("TLS verification failed: {0}")]
    Tls(String),

    #[error("Server error: HTTP {0}")]
    ServerStatus(u16),

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Status codes the transport retries with backoff.
pub const RETRYABLE_STATUS: [u16; 4] = [500, 502, 503, 504];

impl Error {
    /// Whether this is a certificate / TLS handshake failure.
    pub fn is_tls(&self) -> bool {
        matches!(self, Error::Tls(_))
    }

    /// Whether this is a transient server status worth retrying.
    pub fn is_retryable_status(&self) -> bool {
        matches!(self, Error::ServerStatus(code) if RETRYABLE_STATUS.contains(code))
    }

    /// Classify a reqwest failure into a TLS or generic network error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if is_tls_failure(&err) {
            Error::Tls(err.to_string())
        } else {
            Error::Network(describe_chain(&err))
        }
    }
}

/// Walk the source chain looking for certificate or handshake errors.
///
/// The top-level message embeds the request URL, so only sources are inspected.
fn is_tls_failure(err: &reqwest::Error) -> bool {
    use std::error::Error as _;

    let mut source = err.source();
    while let Some(e) = source {
        let text = e.to_string().to_lowercase();
        if ["certificate", "handshake", "tls", "ssl"]
            .iter()
            .any(|needle| text.contains(needle))
        {
            return true;
        }
        source = e.source();
    }
    false
}

/// Flatten an error and its sources into one line.
fn describe_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const ABORT: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
