//! mys-downloader - download the images of a miyoushe user's posts.
//!
//! This library pages through a user's post listing, extracts the images of
//! every post and stores them as
//! `<base>/<date>/<user>/<subject>/<post_id>_<index>.<format>`.
//!
//! # Features
//!
//! - Offset-based pagination of the `userPost` listing
//! - Skip-if-present downloads, so reruns resume naturally
//! - Per-image retries with a TLS verification fallback
//! - Transport retries with exponential backoff for 5xx responses
//! - Cooperative cancellation, checked after every post
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use mys_downloader::{Config, CrawlSession, HttpClient, ProgressEvent};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let transport = Arc::new(HttpClient::new(&config.network)?);
//!     let root = config.download_directory().join("20240101");
//!
//!     let session = CrawlSession::open(transport, &config, "12345", &root).await?;
//!     let outcome = session
//!         .run(&CancellationToken::new(), &mut |event: &ProgressEvent| {
//!             println!("{}", event)
//!         })
//!         .await;
//!     println!("{:?}", outcome.state);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;
pub mod retry;
pub mod shutdown;

// Re-exports for convenience
pub use api::{HttpClient, PostSource, Transport};
pub use config::Config;
pub use download::{
    AssetDownloader, CrawlSession, PostProcessor, ProgressEvent, SessionOutcome, SessionState,
};
pub use error::{Error, Result};
pub use media::{ImageRef, Post, PostPage};
