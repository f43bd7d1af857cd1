//! Post and image representation.

/// An image attached to a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Position in the post's image list, counting entries without a URL.
    pub index: usize,

    /// Source URL.
    pub url: String,

    /// File extension, lowercase, without dot.
    pub format: String,
}

impl ImageRef {
    pub fn new(index: usize, url: impl Into<String>, format: &str) -> Self {
        Self {
            index,
            url: url.into(),
            format: format.to_lowercase(),
        }
    }
}

/// A post with its images in original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub post_id: String,

    /// Full subject; only truncated for display.
    pub subject: String,

    pub images: Vec<ImageRef>,
}

impl Post {
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Download targets for every image, keyed by its list position.
    pub fn targets(&self) -> impl Iterator<Item = (DownloadTarget, &ImageRef)> + '_ {
        self.images.iter().map(|image| {
            (
                DownloadTarget::new(&self.post_id, image.index, &image.format),
                image,
            )
        })
    }
}

/// One page of the user's post listing.
#[derive(Debug, Clone, Default)]
pub struct PostPage {
    pub posts: Vec<Post>,

    /// Token for the following page.
    pub next_offset: String,

    pub is_last: bool,
}

/// Filename an image is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub post_id: String,
    pub index: usize,
    pub format: String,
}

impl DownloadTarget {
    pub fn new(post_id: &str, index: usize, format: &str) -> Self {
        Self {
            post_id: post_id.to_string(),
            index,
            format: format.to_lowercase(),
        }
    }

    /// `{post_id}_{index}.{format}`
    pub fn filename(&self) -> String {
        format!("{}_{}.{}", self.post_id, self.index, self.format)
    }
}
