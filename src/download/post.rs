//! Per-post image extraction and download.

use std::time::Duration;

use tokio::time::sleep;

use crate::download::events::ProgressEvent;
use crate::download::media::{AssetDownloader, AssetOutcome};
use crate::download::state::PostReport;
use crate::fs::display_subject;
use crate::media::Post;

/// Drives the downloader for every image of a post.
pub struct PostProcessor {
    downloader: AssetDownloader,
    image_delay: Duration,
}

impl PostProcessor {
    pub fn new(downloader: AssetDownloader, image_delay: Duration) -> Self {
        Self {
            downloader,
            image_delay,
        }
    }

    pub fn downloader(&self) -> &AssetDownloader {
        &self.downloader
    }

    /// Download each image in order, pausing after every one.
    pub async fn process(
        &mut self,
        post: &Post,
        on_progress: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) -> PostReport {
        let mut report = PostReport::default();
        if !post.has_images() {
            return report;
        }

        let subject = display_subject(&post.subject);
        let count = post.images.len();

        for (position, (target, image)) in post.targets().enumerate() {
            on_progress(&ProgressEvent::ImageStarted {
                subject: subject.clone(),
                index: position,
                count,
                size: self.downloader.size_string(),
            });

            match self
                .downloader
                .ensure(&image.url, &post.subject, &target.filename())
                .await
            {
                AssetOutcome::Downloaded(_) => report.downloaded += 1,
                AssetOutcome::Existing(_) => report.skipped += 1,
                AssetOutcome::Failed(reason) => {
                    report.failed += 1;
                    on_progress(&ProgressEvent::ImageFailed {
                        url: image.url.clone(),
                        reason,
                    });
                }
            }

            sleep(self.image_delay).await;
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::api::http::mock::ScriptedTransport;
    use crate::media::ImageRef;

    fn processor(transport: Arc<ScriptedTransport>, dir: &std::path::Path) -> PostProcessor {
        let downloader = AssetDownloader::new(transport, dir)
            .with_max_retries(1)
            .with_retry_delay(Duration::ZERO);
        PostProcessor::new(downloader, Duration::ZERO)
    }

    #[tokio::test]
    async fn test_post_without_images_is_noop() {
        let transport = Arc::new(ScriptedTransport::new(vec![]));
        let temp = tempfile::tempdir().unwrap();
        let mut processor = processor(transport.clone(), temp.path());

        let post = Post {
            post_id: "P1".into(),
            subject: "text only".into(),
            images: vec![],
        };
        let mut events = Vec::new();
        let report = processor
            .process(&post, &mut |e: &ProgressEvent| events.push(e.clone()))
            .await;

        assert_eq!(report, PostReport::default());
        assert!(events.is_empty());
        assert!(transport.calls().is_empty());
        assert!(!temp.path().join("text only").exists());
    }

    #[tokio::test]
    async fn test_images_downloaded_in_order_with_progress() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::ok(b"first"),
            ScriptedTransport::status(404),
            ScriptedTransport::ok(b"third"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut processor = processor(transport.clone(), temp.path());

        let subject = "A very long subject line that goes past thirty characters";
        let post = Post {
            post_id: "P9".into(),
            subject: subject.into(),
            images: vec![
                ImageRef::new(0, "https://x/1", "JPG"),
                ImageRef::new(1, "https://x/2", "png"),
                ImageRef::new(2, "https://x/3", "GIF"),
            ],
        };

        let mut events = Vec::new();
        let report = processor
            .process(&post, &mut |e: &ProgressEvent| events.push(e.clone()))
            .await;

        assert_eq!(
            report,
            PostReport {
                downloaded: 2,
                skipped: 0,
                failed: 1
            }
        );

        let urls: Vec<String> = transport.calls().into_iter().map(|(u, _)| u).collect();
        assert_eq!(urls, vec!["https://x/1", "https://x/2", "https://x/3"]);

        let dir = temp.path().join(&subject[..50]);
        assert_eq!(std::fs::read(dir.join("P9_0.jpg")).unwrap(), b"first");
        assert!(!dir.join("P9_1.png").exists());
        assert_eq!(std::fs::read(dir.join("P9_2.gif")).unwrap(), b"third");

        let started: Vec<&ProgressEvent> = events
            .iter()
            .filter(|e| matches!(e, ProgressEvent::ImageStarted { .. }))
            .collect();
        assert_eq!(started.len(), 3);
        match started[0] {
            ProgressEvent::ImageStarted { subject: shown, .. } => {
                assert_eq!(shown, &format!("{}...", &subject[..30]));
            }
            _ => unreachable!(),
        }
        assert!(events
            .iter()
            .any(|e| matches!(e, ProgressEvent::ImageFailed { url, .. } if url == "https://x/2")));
    }

    #[tokio::test]
    async fn test_tls_fallback_reports_no_failure() {
        let transport = Arc::new(ScriptedTransport::new(vec![
            ScriptedTransport::tls_error(),
            ScriptedTransport::ok(b"0123456789"),
        ]));
        let temp = tempfile::tempdir().unwrap();
        let mut processor = processor(transport.clone(), temp.path());

        let post = Post {
            post_id: "P1".into(),
            subject: "Hello".into(),
            images: vec![ImageRef::new(0, "https://upload-bbs.mihoyo.com/a.png", "PNG")],
        };

        let mut events = Vec::new();
        let report = processor
            .process(&post, &mut |e: &ProgressEvent| events.push(e.clone()))
            .await;

        assert_eq!(report.downloaded, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(transport.calls().len(), 2);
        assert!(!events
            .iter()
            .any(|e| matches!(e, ProgressEvent::ImageFailed { .. })));
        assert_eq!(
            std::fs::read(temp.path().join("Hello").join("P1_0.png")).unwrap(),
            b"0123456789"
        );
    }
}
