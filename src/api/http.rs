//! HTTP transport shared by the listing API and the image downloader.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::retry::{retry_with_backoff, RetryAction, RetryConfig};

/// Whether a request verifies the server certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMode {
    Verify,
    Insecure,
}

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded as UTF-8 (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can issue GET requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)], tls: TlsMode) -> Result<HttpResponse>;
}

/// reqwest-backed transport with a verifying and a non-verifying client.
pub struct HttpClient {
    verified: Client,
    insecure: Client,
    retry: RetryConfig,
}

impl HttpClient {
    /// Build both clients from the network configuration.
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);

        let verified = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        let insecure = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| Error::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            verified,
            insecure,
            retry: RetryConfig {
                max_retries: config.transport_retries,
                base_delay: Duration::from_millis(config.backoff_base_ms),
                max_delay: Duration::from_millis(config.backoff_max_ms),
            },
        })
    }

    fn client(&self, tls: TlsMode) -> &Client {
        match tls {
            TlsMode::Verify => &self.verified,
            TlsMode::Insecure => &self.insecure,
        }
    }

    /// Single attempt; retryable statuses come back as `Error::ServerStatus`.
    async fn send_once(
        &self,
        url: &str,
        query: &[(&str, &str)],
        tls: TlsMode,
    ) -> Result<HttpResponse> {
        tracing::debug!("GET {} {:?} ({:?})", url, query, tls);

        let response = self
            .client(tls)
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(Error::from_transport)?;

        let status = response.status().as_u16();
        tracing::debug!("Response status: {}", status);

        let err = Error::ServerStatus(status);
        if err.is_retryable_status() {
            return Err(err);
        }

        let body = response.bytes().await.map_err(Error::from_transport)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn get(&self, url: &str, query: &[(&str, &str)], tls: TlsMode) -> Result<HttpResponse> {
        retry_with_backoff(
            &self.retry,
            |e: &Error| {
                if e.is_retryable_status() {
                    RetryAction::Retry
                } else {
                    RetryAction::Abort
                }
            },
            || self.send_once(url, query, tls),
        )
        .await
    }
}
