//! miyoushe user-post listing client.

use std::sync::Arc;

use crate::api::http::{TlsMode, Transport};
use crate::api::types::{ApiResponse, UserPostList};
use crate::error::{Error, Result};
use crate::fs::sanitize_component;
use crate::media::{first_nickname, parse_page, PostPage};

/// Default listing endpoint.
pub const API_BASE: &str = "https://bbs-api.miyoushe.com/post/wapi/userPost";

/// Posts per page when crawling.
pub const PAGE_SIZE: u32 = 20;

/// `retcode` returned for unknown accounts.
const RETCODE_NOT_FOUND: i64 = -1;

/// Paginated post source for one account.
pub struct PostSource {
    transport: Arc<dyn Transport>,
    endpoint: String,
    uid: String,
    page_size: u32,
}

impl PostSource {
    pub fn new(
        transport: Arc<dyn Transport>,
        endpoint: impl Into<String>,
        uid: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            uid: uid.into(),
            page_size: PAGE_SIZE,
        }
    }

    /// Override the crawl page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Issue one listing request and decode the envelope.
    async fn query(&self, size: u32, offset: &str) -> Result<ApiResponse<UserPostList>> {
        let size = size.to_string();
        let params = [
            ("uid", self.uid.as_str()),
            ("size", size.as_str()),
            ("offset", offset),
        ];

        let response = self
            .transport
            .get(&self.endpoint, &params, TlsMode::Verify)
            .await?;
        let text = response.text();
        tracing::debug!("Listing response: {}", text);

        serde_json::from_str(&text).map_err(|e| {
            Error::Api(format!(
                "Failed to parse listing: {} - Response: {}",
                e,
                text.chars().take(500).collect::<String>()
            ))
        })
    }

    /// Fetch the page starting at `offset` (empty for the first page).
    pub async fn fetch_page(&self, offset: &str) -> Result<PostPage> {
        let response = self.query(self.page_size, offset).await.map_err(|e| match e {
            Error::Api(_) => e,
            other => Error::Api(other.to_string()),
        })?;

        if response.retcode != 0 {
            return Err(Error::Api(response.message));
        }

        let data = response
            .data
            .ok_or_else(|| Error::Api("Response contained no data".into()))?;

        Ok(parse_page(data))
    }

    /// Whether the account exists. `false` may also mean the probe failed.
    pub async fn validate_account(&self) -> bool {
        match self.query(1, "").await {
            Ok(response) if response.retcode == 0 => true,
            Ok(response) if response.retcode == RETCODE_NOT_FOUND => {
                tracing::debug!("Account {} not found: {}", self.uid, response.message);
                false
            }
            Ok(response) => {
                tracing::debug!(
                    "Unexpected retcode {} while probing {}: {}",
                    response.retcode,
                    self.uid,
                    response.message
                );
                false
            }
            Err(e) => {
                tracing::debug!("Account probe for {} failed: {}", self.uid, e);
                false
            }
        }
    }

    /// Sanitized author nickname, falling back to the uid.
    pub async fn resolve_display_name(&self) -> String {
        let nickname = match self.query(1, "").await {
            Ok(response) => response
                .data
                .as_ref()
                .and_then(first_nickname)
                .map(sanitize_component),
            Err(e) => {
                tracing::debug!("Could not resolve nickname for {}: {}", self.uid, e);
                None
            }
        };

        nickname.unwrap_or_else(|| self.uid.clone())
    }
}
