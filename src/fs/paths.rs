//! Path and directory management.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::error::Result;
use crate::fs::naming::{subject_dir_name, user_dir_name};

/// Date folder name, `YYYYMMDD`.
pub fn date_folder(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Root for today's run: `<download_directory>/<YYYYMMDD>`.
pub fn get_date_root(config: &Config) -> PathBuf {
    config
        .download_directory()
        .join(date_folder(Local::now().date_naive()))
}

/// Per-user save path under a date root.
pub fn get_user_folder(date_root: &Path, display_name: &str) -> PathBuf {
    date_root.join(user_dir_name(display_name))
}

/// Directory holding the images of one post.
pub fn get_subject_folder(save_path: &Path, subject: &str) -> PathBuf {
    save_path.join(subject_dir_name(subject))
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}
