//! Progress events reported to the presentation layer.

use std::fmt;

/// Status update emitted while a session runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Counting pass progress.
    Counting { counted: u64 },

    /// Counting pass finished.
    Counted { total: u64 },

    /// A page arrived; `found` is the running post total.
    PostsFound { found: u64 },

    /// About to download one image of a post.
    ImageStarted {
        subject: String,
        index: usize,
        count: usize,
        size: String,
    },

    /// An image could not be downloaded.
    ImageFailed { url: String, reason: String },

    /// A post has been processed.
    PostDone {
        processed: u64,
        total: u64,
        subject: String,
        size: String,
    },

    Completed { posts: u64, size: String },

    Cancelled { posts: u64, size: String },

    Failed { message: String },
}

impl ProgressEvent {
    /// Whether this is the last event of a session.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProgressEvent::Completed { .. }
                | ProgressEvent::Cancelled { .. }
                | ProgressEvent::Failed { .. }
        )
    }
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressEvent::Counting { counted } => {
                write!(f, "Counting posts... {} so far", counted)
            }
            ProgressEvent::Counted { total } => write!(f, "User has {} posts", total),
            ProgressEvent::PostsFound { found } => {
                write!(f, "Found {} posts | waiting to start download...", found)
            }
            ProgressEvent::ImageStarted {
                subject,
                index,
                count,
                size,
            } => write!(
                f,
                "Downloading image {}/{} of 「{}」 | downloaded {}",
                index + 1,
                count,
                subject,
                size
            ),
            ProgressEvent::ImageFailed { url, reason } => {
                write!(f, "Failed to download {}: {}", url, reason)
            }
            ProgressEvent::PostDone {
                processed,
                total,
                subject,
                size,
            } => write!(
                f,
                "Found {} posts | downloading post {}/{} 「{}」 | downloaded {}",
                total, processed, total, subject, size
            ),
            ProgressEvent::Completed { posts, size } => write!(
                f,
                "Download complete! Processed {} posts, total size {}",
                posts, size
            ),
            ProgressEvent::Cancelled { posts, size } => write!(
                f,
                "Stopped by user after {} posts ({} downloaded)",
                posts, size
            ),
            ProgressEvent::Failed { message } => write!(f, "Failed to fetch posts: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let event = ProgressEvent::PostDone {
            processed: 3,
            total: 20,
            subject: "Hello".into(),
            size: "1.5MB".into(),
        };
        assert_eq!(
            event.to_string(),
            "Found 20 posts | downloading post 3/20 「Hello」 | downloaded 1.5MB"
        );
        assert!(!event.is_terminal());
    }

    #[test]
    fn test_cancelled_is_not_a_failure_message() {
        let event = ProgressEvent::Cancelled {
            posts: 2,
            size: "10B".into(),
        };
        assert!(event.is_terminal());
        assert!(event.to_string().starts_with("Stopped by user"));
    }
}
