//! Media module for post and image representation.

pub mod item;
pub mod parser;

pub use item::{DownloadTarget, ImageRef, Post, PostPage};
pub use parser::{first_nickname, parse_page, parse_post};
