//! Conversion from listing entries to posts.

use crate::api::types::{PostEntry, UserPostList};
use crate::media::item::{ImageRef, Post, PostPage};

/// Convert a listing entry, dropping images without a URL.
///
/// Kept images retain their position in the listing.
pub fn parse_post(entry: &PostEntry) -> Post {
    let images = entry
        .image_list
        .iter()
        .flatten()
        .enumerate()
        .filter_map(|(index, img)| {
            img.url
                .as_deref()
                .map(|url| ImageRef::new(index, url, &img.format))
        })
        .collect();

    Post {
        post_id: entry.post.post_id.clone(),
        subject: entry.post.subject.clone(),
        images,
    }
}

/// Convert a listing payload into a page.
pub fn parse_page(data: UserPostList) -> PostPage {
    PostPage {
        posts: data.list.iter().map(parse_post).collect(),
        next_offset: data.next_offset,
        is_last: data.is_last,
    }
}

/// Author nickname of the first entry, if any.
pub fn first_nickname(data: &UserPostList) -> Option<&str> {
    data.list
        .first()?
        .user
        .as_ref()?
        .nickname
        .as_deref()
        .filter(|name| !name.is_empty())
}
