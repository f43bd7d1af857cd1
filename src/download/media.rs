//! Image file downloading.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::api::Transport;
use crate::download::state::ByteCounter;
use crate::download::tls::TlsFallback;
use crate::error::{Error, Result};
use crate::fs::{ensure_dir, get_subject_folder};

/// Default download attempts per image.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// What `ensure` did for one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetOutcome {
    /// Fetched and written; bytes written.
    Downloaded(u64),
    /// Already on disk; its size.
    Existing(u64),
    /// All attempts failed.
    Failed(String),
}

impl AssetOutcome {
    pub fn is_present(&self) -> bool {
        !matches!(self, AssetOutcome::Failed(_))
    }
}

/// Downloads images into per-subject folders under one save path.
pub struct AssetDownloader {
    transport: Arc<dyn Transport>,
    base_dir: PathBuf,
    max_retries: u32,
    retry_delay: Duration,
    tls: TlsFallback,
    show_skipped: bool,
    bytes: ByteCounter,
}

impl AssetDownloader {
    pub fn new(transport: Arc<dyn Transport>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            base_dir: base_dir.into(),
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_secs(1),
            tls: TlsFallback::default(),
            show_skipped: false,
            bytes: ByteCounter::default(),
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_tls(mut self, tls: TlsFallback) -> Self {
        self.tls = tls;
        self
    }

    pub fn with_show_skipped(mut self, show_skipped: bool) -> Self {
        self.show_skipped = show_skipped;
        self
    }

    /// Cumulative bytes for this downloader.
    pub fn total_bytes(&self) -> u64 {
        self.bytes.total()
    }

    /// Cumulative size, formatted.
    pub fn size_string(&self) -> String {
        self.bytes.to_string()
    }

    /// Make sure `<base>/<subject>/<filename>` exists. Never fails the caller.
    pub async fn ensure_downloaded(&mut self, url: &str, subject: &str, filename: &str) -> bool {
        self.ensure(url, subject, filename).await.is_present()
    }

    /// Like [`ensure_downloaded`](Self::ensure_downloaded) but reports what happened.
    pub async fn ensure(&mut self, url: &str, subject: &str, filename: &str) -> AssetOutcome {
        let subject_dir = get_subject_folder(&self.base_dir, subject);
        if let Err(e) = ensure_dir(&subject_dir).await {
            let err = Error::Download(format!(
                "cannot create {}: {}",
                subject_dir.display(),
                e
            ));
            tracing::warn!("{}", err);
            return AssetOutcome::Failed(err.to_string());
        }

        let output_path = subject_dir.join(filename);

        // Existing files are counted again on every call.
        if let Ok(meta) = tokio::fs::metadata(&output_path).await {
            if meta.is_file() {
                self.bytes.add(meta.len());
                if self.show_skipped {
                    tracing::info!("Skipping existing file: {}", output_path.display());
                } else {
                    tracing::debug!("Skipping existing file: {}", output_path.display());
                }
                return AssetOutcome::Existing(meta.len());
            }
        }

        let mut last_error = String::new();
        for attempt in 1..=self.max_retries {
            match self.tls.fetch(self.transport.as_ref(), url).await {
                Ok(response) if response.is_ok() => {
                    match write_atomic(&output_path, &response.body).await {
                        Ok(()) => {
                            let len = response.body.len() as u64;
                            self.bytes.add(len);
                            tracing::debug!("Downloaded: {}", output_path.display());
                            return AssetOutcome::Downloaded(len);
                        }
                        Err(e) => last_error = e.to_string(),
                    }
                }
                Ok(response) => last_error = format!("HTTP {}", response.status),
                Err(e) => last_error = e.to_string(),
            }

            tracing::debug!(
                "Attempt {}/{} for {} failed: {}",
                attempt,
                self.max_retries,
                url,
                last_error
            );

            if attempt < self.max_retries {
                sleep(self.retry_delay).await;
            }
        }

        let err = Error::Download(format!("{}: {}", url, last_error));
        tracing::warn!("{}", err);
        AssetOutcome::Failed(err.to_string())
    }
}

/// Write to a sibling `.part` file, then rename into place.
async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut part = path.as_os_str().to_owned();
    part.push(".part");
    let part = PathBuf::from(part);

    if let Err(e) = tokio::fs::write(&part, bytes).await {
        let _ = tokio::fs::remove_file(&part).await;
        return Err(e.into());
    }
    tokio::fs::rename(&part, path).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::http::mock::ScriptedTransport;
    use crate::api::{HttpClient, TlsMode};
    use crate::config::NetworkConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http() -> Arc<dyn Transport> {
        Arc::new(
            HttpClient::new(&NetworkConfig {
                transport_retries: 0,
                ..Default::default()
            })
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_downloads_into_subject_folder() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PNGDATA".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let mut downloader =
            AssetDownloader::new(http(), temp.path()).with_retry_delay(Duration::ZERO);

        let ok = downloader
            .ensure_downloaded(&format!("{}/a.png", server.uri()), "a:b", "P1_0.png")
            .await;

        assert!(ok);
        let written = temp.path().join("a_b").join("P1_0.png");
        assert_eq!(std::fs::read(&written).unwrap(), b"PNGDATA");
        assert!(!temp.path().join("a_b").join("P1_0.png.part").exists());
        assert_eq!(downloader.total_bytes(), 7);
    }

    #[tokio::test]
    async fn test_second_call_skips_network_but_counts_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/a.png"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 2048]))
            .expect(1)
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let mut downloader = AssetDownloader::new(http(), temp.path());
        let url = format!("{}/a.png", server.uri());

        assert_eq!(
            downloader.ensure(&url, "Hello", "P1_0.png").await,
            AssetOutcome::Downloaded(2048)
        );
        assert_eq!(
            downloader.ensure(&url, "Hello", "P1_0.png").await,
            AssetOutcome::Existing(2048)
        );
        assert_eq!(downloader.total_bytes(), 4096);
        assert_eq!(downloader.size_string(), "4.0KB");
    }

    #[tokio::test]
    async fn test_non_200_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(3)
            .mount(&server)
            .await;

        let temp = tempfile::tempdir().unwrap();
        let mut downloader =
            AssetDownloader::new(http(), temp.path()).with_retry_delay(Duration::ZERO);

        let outcome = downloader
            .ensure(&format!("{}/gone.png", server.uri()), "Hello", "P1_0.png")
            .await;

        assert!(matches!(outcome, AssetOutcome::Failed(ref m) if m.contains("HTTP 404")));
        assert!(!temp.path().join("Hello").join("P1_0.png").exists());
        assert_eq!(downloader.total_bytes(), 0);
    }

    #[tokio::test]
    async fn test_tls_fallback_succeeds_after_two_calls() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::tls_error(),
            ScriptedTransport::ok(b"0123456789"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut downloader = AssetDownloader::new(transport.clone(), temp.path())
            .with_retry_delay(Duration::ZERO);

        let outcome = downloader
            .ensure("https://upload-bbs.mihoyo.com/a.jpg", "Hello", "P1_0.jpg")
            .await;

        assert_eq!(outcome, AssetOutcome::Downloaded(10));
        let modes: Vec<TlsMode> = transport.calls().into_iter().map(|(_, m)| m).collect();
        assert_eq!(modes, vec![TlsMode::Verify, TlsMode::Insecure]);
    }

    #[tokio::test]
    async fn test_recovers_on_later_attempt() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            Err(Error::Network("timed out".into())),
            ScriptedTransport::status(403),
            ScriptedTransport::ok(b"abc"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut downloader = AssetDownloader::new(transport.clone(), temp.path())
            .with_retry_delay(Duration::ZERO);

        assert!(downloader.ensure_downloaded("https://x/a.gif", "s", "1_0.gif").await);
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_respects_max_retries() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::status(500),
            ScriptedTransport::ok(b"too late"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut downloader = AssetDownloader::new(transport.clone(), temp.path())
            .with_max_retries(1)
            .with_retry_delay(Duration::ZERO);

        assert!(!downloader.ensure_downloaded("https://x/a.gif", "s", "1_0.gif").await);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_strict_tls_does_not_fall_back() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::tls_error(),
            ScriptedTransport::ok(b"never"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut downloader = AssetDownloader::new(transport.clone(), temp.path())
            .with_max_retries(1)
            .with_tls(TlsFallback::strict());

        let outcome = downloader.ensure("https://x/a.png", "s", "1_0.png").await;

        assert!(matches!(outcome, AssetOutcome::Failed(_)));
        assert_eq!(transport.calls(), vec![("https://x/a.png".to_string(), TlsMode::Verify)]);
    }
}
