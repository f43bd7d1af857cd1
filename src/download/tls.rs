//! Verify-then-insecure fetch strategy for image hosts.

use crate::api::{HttpResponse, TlsMode, Transport};
use crate::error::Result;

/// Fetch with certificate verification; on a TLS failure only, repeat the
/// request once with verification disabled.
#[derive(Debug, Clone, Copy)]
pub struct TlsFallback {
    pub allow_insecure: bool,
}

impl Default for TlsFallback {
    fn default() -> Self {
        Self {
            allow_insecure: true,
        }
    }
}

impl TlsFallback {
    pub fn strict() -> Self {
        Self {
            allow_insecure: false,
        }
    }

    pub async fn fetch(&self, transport: &dyn Transport, url: &str) -> Result<HttpResponse> {
        match transport.get(url, &[], TlsMode::Verify).await {
            Err(e) if e.is_tls() && self.allow_insecure => {
                tracing::debug!(
                    "TLS verification failed for {}, retrying without verification: {}",
                    url,
                    e
                );
                transport.get(url, &[], TlsMode::Insecure).await
            }
            other => other,
        }
    }
}
