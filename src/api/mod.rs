//! miyoushe API module.
//!
//! This module provides:
//! - HTTP transport with status retry and a TLS toggle
//! - Paginated user-post listing client
//! - API response types

pub mod client;
pub mod http;
pub mod types;

pub use client::{PostSource, API_BASE, PAGE_SIZE};
pub use http::{HttpClient, HttpResponse, TlsMode, Transport};
pub use types::*;
