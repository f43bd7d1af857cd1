//! Download module for content downloading.
//!
//! This module provides:
//! - Byte counting and session statistics
//! - Verify-then-insecure TLS fetch strategy
//! - Image file downloading
//! - Per-post processing
//! - The paginated crawl session

pub mod events;
pub mod media;
pub mod post;
pub mod session;
pub mod state;
pub mod tls;

pub use events::ProgressEvent;
pub use media::{AssetDownloader, AssetOutcome};
pub use post::PostProcessor;
pub use session::{CrawlSession, SessionOutcome, SessionState};
pub use state::{format_size, ByteCounter, PostReport, SessionStats};
pub use tls::TlsFallback;
