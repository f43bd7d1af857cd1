//! Crawl session: pages → posts → images.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::{PostSource, Transport};
use crate::config::Config;
use crate::download::events::ProgressEvent;
use crate::download::media::AssetDownloader;
use crate::download::post::PostProcessor;
use crate::download::state::SessionStats;
use crate::error::{Error, Result};
use crate::fs::{display_subject, ensure_dir, get_user_folder};
use crate::media::Post;

/// Lifecycle of a crawl session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Counting,
    Running,
    Completed,
    Cancelled,
    Failed(String),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionState::Completed | SessionState::Cancelled | SessionState::Failed(_)
        )
    }
}

/// Final result of [`CrawlSession::run`].
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub state: SessionState,
    pub stats: SessionStats,
    pub total_bytes: u64,
    pub size: String,
    pub save_path: PathBuf,
}

/// One download run for one account.
pub struct CrawlSession {
    source: PostSource,
    processor: PostProcessor,
    display_name: String,
    save_path: PathBuf,
    page_delay: Duration,
    state: SessionState,
    stats: SessionStats,
}

impl CrawlSession {
    /// Validate the account, resolve its name and prepare `<date_root>/<name>`.
    ///
    /// Nothing is created on disk when the account cannot be validated.
    pub async fn open(
        transport: Arc<dyn Transport>,
        config: &Config,
        uid: &str,
        date_root: &Path,
    ) -> Result<Self> {
        let source = PostSource::new(
            transport.clone(),
            config.network.api_base_url.clone(),
            uid,
        )
        .with_page_size(config.options.page_size);

        if !source.validate_account().await {
            return Err(Error::AccountNotFound(uid.to_string()));
        }

        let display_name = source.resolve_display_name().await;
        let save_path = get_user_folder(date_root, &display_name);
        ensure_dir(&save_path).await?;

        tracing::info!(
            "Saving posts of {} ({}) to {}",
            display_name,
            uid,
            save_path.display()
        );

        let pacing = config.options.pacing();
        let downloader = AssetDownloader::new(transport, save_path.clone())
            .with_max_retries(config.options.max_retries)
            .with_retry_delay(pacing.retry_delay)
            .with_show_skipped(config.options.show_skipped);

        Ok(Self {
            source,
            processor: PostProcessor::new(downloader, pacing.image_delay),
            display_name,
            save_path,
            page_delay: pacing.page_delay,
            state: SessionState::Idle,
            stats: SessionStats::default(),
        })
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn source(&self) -> &PostSource {
        &self.source
    }

    /// Cumulative size, formatted.
    pub fn size_string(&self) -> String {
        self.processor.downloader().size_string()
    }

    /// Walk every page once and count posts.
    ///
    /// A failing page or a cancelled token ends the count with the total so far.
    pub async fn count_posts(
        &mut self,
        cancel: &CancellationToken,
        observer: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) -> u64 {
        self.state = SessionState::Counting;
        tracing::info!("Counting posts of {}...", self.display_name);

        let mut total = 0u64;
        let mut offset = String::new();

        loop {
            let page = match self.source.fetch_page(&offset).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!("Counting stopped early: {}", e);
                    break;
                }
            };

            total += page.posts.len() as u64;
            observer(&ProgressEvent::Counting { counted: total });

            if page.is_last || page.next_offset == offset {
                break;
            }

            if cancel.is_cancelled() {
                tracing::info!("Counting stopped by user");
                break;
            }

            offset = page.next_offset;
            sleep(self.page_delay).await;
        }

        self.stats.posts_total = Some(total);
        observer(&ProgressEvent::Counted { total });
        tracing::info!("User has {} posts", total);
        total
    }

    /// Download everything until the last page, a listing error, or cancellation.
    ///
    /// `cancel` is checked once after every post; a download in progress
    /// always finishes first.
    pub async fn run(
        mut self,
        cancel: &CancellationToken,
        observer: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) -> SessionOutcome {
        self.state = SessionState::Running;
        let mut offset = String::new();

        loop {
            let page = match self.source.fetch_page(&offset).await {
                Ok(page) => page,
                Err(e) => {
                    let message = match e {
                        Error::Api(message) => message,
                        other => other.to_string(),
                    };
                    return self.finish(SessionState::Failed(message), observer);
                }
            };

            self.stats.pages_fetched += 1;
            self.stats.posts_found += page.posts.len() as u64;
            observer(&ProgressEvent::PostsFound {
                found: self.stats.posts_found,
            });

            for post in &page.posts {
                self.process_post(post, observer).await;

                if cancel.is_cancelled() {
                    tracing::info!("Stopped by user");
                    return self.finish(SessionState::Cancelled, observer);
                }
            }

            if page.is_last {
                return self.finish(SessionState::Completed, observer);
            }

            if page.next_offset == offset {
                let message = format!("pagination did not advance past offset '{}'", offset);
                return self.finish(SessionState::Failed(message), observer);
            }

            sleep(self.page_delay).await;
            offset = page.next_offset;
        }
    }

    async fn process_post(
        &mut self,
        post: &Post,
        observer: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) {
        let report = self.processor.process(post, observer).await;
        self.stats.record_post(report);

        observer(&ProgressEvent::PostDone {
            processed: self.stats.posts_processed,
            total: self.stats.known_total(),
            subject: display_subject(&post.subject),
            size: self.size_string(),
        });
    }

    fn finish(
        mut self,
        state: SessionState,
        observer: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) -> SessionOutcome {
        let size = self.size_string();
        let posts = self.stats.posts_processed;

        let event = match &state {
            SessionState::Completed => {
                tracing::info!(
                    "Download complete: {} posts, {} images, total {}",
                    posts,
                    self.stats.images_downloaded,
                    size
                );
                ProgressEvent::Completed {
                    posts,
                    size: size.clone(),
                }
            }
            SessionState::Cancelled => ProgressEvent::Cancelled {
                posts,
                size: size.clone(),
            },
            SessionState::Failed(message) => {
                tracing::error!("Failed to fetch posts: {}", message);
                ProgressEvent::Failed {
                    message: message.clone(),
                }
            }
            other => ProgressEvent::Failed {
                message: format!("session ended while {:?}", other),
            },
        };
        observer(&event);

        self.state = state;
        SessionOutcome {
            state: self.state,
            stats: self.stats,
            total_bytes: self.processor.downloader().total_bytes(),
            size,
            save_path: self.save_path,
        }
    }
}
