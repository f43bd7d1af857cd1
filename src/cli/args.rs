//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// miyoushe post image downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "mys-downloader",
    version,
    about = "Download the images of a miyoushe user's posts",
    long_about = "Pages through a miyoushe user's posts and saves every attached image.\n\n\
                  Files already on disk are skipped, so an interrupted run can simply be restarted."
)]
pub struct Args {
    /// User ID or profile link
    /// (e.g. https://www.miyoushe.com/ys/accountCenter/postList?id=12345).
    #[arg(short, long, env = "MYS_UID")]
    pub user: Option<String>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "directory")]
    pub download_directory: Option<PathBuf>,

    /// Browser user agent string.
    #[arg(short = 'a', long = "user-agent", env = "MYS_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Count all posts before downloading.
    #[arg(long)]
    pub count: bool,

    /// Download attempts per image.
    #[arg(long)]
    pub max_retries: Option<u32>,

    /// Milliseconds to wait between listing pages.
    #[arg(long)]
    pub page_delay: Option<u64>,

    /// Milliseconds to wait after each image.
    #[arg(long)]
    pub image_delay: Option<u64>,

    /// Hide the live progress line.
    #[arg(long, short)]
    pub quiet: bool,

    /// Show information about skipped downloads.
    #[arg(long)]
    pub show_skipped: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(user) = &self.user {
            config.target.uid = Some(user.clone());
        }

        if let Some(dir) = &self.download_directory {
            config.options.download_directory = Some(dir.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.network.user_agent = user_agent.clone();
        }

        if self.count {
            config.options.count_posts_first = true;
        }

        if let Some(retries) = self.max_retries {
            config.options.max_retries = retries;
        }

        if let Some(delay) = self.page_delay {
            config.options.page_delay_ms = delay;
        }

        if let Some(delay) = self.image_delay {
            config.options.image_delay_ms = delay;
        }

        if self.show_skipped {
            config.options.show_skipped = true;
        }
    }
}
