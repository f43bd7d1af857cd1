//! Download state tracking.

use std::fmt;

/// Cumulative bytes of every asset seen present during one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ByteCounter {
    total: u64,
}

impl ByteCounter {
    pub fn add(&mut self, bytes: u64) {
        self.total = self.total.saturating_add(bytes);
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl fmt::Display for ByteCounter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_size(self.total))
    }
}

/// Human-readable size: `{n}B`, `{n.n}KB` or `{n.n}MB`.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;

    let value = bytes as f64;
    if value < KB {
        format!("{}B", bytes)
    } else if value < MB {
        format!("{:.1}KB", value / KB)
    } else {
        format!("{:.1}MB", value / MB)
    }
}

/// Outcome for the images of a single post.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PostReport {
    pub downloaded: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Per-session statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    /// Posts returned by the listing so far.
    pub posts_found: u64,

    /// Result of the optional counting pass.
    pub posts_total: Option<u64>,

    pub posts_processed: u64,
    pub pages_fetched: u64,
    pub images_downloaded: u64,
    pub images_skipped: u64,
    pub images_failed: u64,
}

impl SessionStats {
    /// Fold in the report of one processed post.
    pub fn record_post(&mut self, report: PostReport) {
        self.posts_processed += 1;
        self.images_downloaded += report.downloaded;
        self.images_skipped += report.skipped;
        self.images_failed += report.failed;
    }

    /// Denominator for "post k of n" progress text.
    pub fn known_total(&self) -> u64 {
        self.posts_total
            .map(|total| total.max(self.posts_found))
            .unwrap_or(self.posts_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_thresholds() {
        assert_eq!(format_size(0), "0B");
        assert_eq!(format_size(1023), "1023B");
        assert_eq!(format_size(1024), "1.0KB");
        assert_eq!(format_size(1536), "1.5KB");
        assert_eq!(format_size(1024 * 1024 - 1), "1024.0KB");
        assert_eq!(format_size(1024 * 1024), "1.0MB");
        assert_eq!(format_size(5 * 1024 * 1024 + 512 * 1024), "5.5MB");
    }

    #[test]
    fn test_byte_counter_accumulates() {
        let mut counter = ByteCounter::default();
        counter.add(1000);
        counter.add(48);
        assert_eq!(counter.total(), 1048);
        assert_eq!(counter.to_string(), "1.0KB");
    }

    #[test]
    fn test_record_post() {
        let mut stats = SessionStats::default();
        stats.record_post(PostReport {
            downloaded: 2,
            skipped: 1,
            failed: 0,
        });
        stats.record_post(PostReport::default());
        assert_eq!(stats.posts_processed, 2);
        assert_eq!(stats.images_downloaded, 2);
        assert_eq!(stats.images_skipped, 1);
    }

    #[test]
    fn test_known_total() {
        let mut stats = SessionStats {
            posts_found: 40,
            ..Default::default()
        };
        assert_eq!(stats.known_total(), 40);
        stats.posts_total = Some(55);
        assert_eq!(stats.known_total(), 55);
    }
}
