//! API response type definitions.

use serde::Deserialize;

/// Generic response envelope of the bbs-api endpoints.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub retcode: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// `data` payload of the userPost listing.
#[derive(Debug, Deserialize)]
pub struct UserPostList {
    #[serde(default)]
    pub list: Vec<PostEntry>,
    #[serde(default)]
    pub is_last: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub next_offset: String,
}

/// One entry of the listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PostEntry {
    pub post: PostInfo,
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub image_list: Option<Vec<ImageEntry>>,
}

/// Core post fields.
#[derive(Debug, Clone, Deserialize)]
pub struct PostInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub post_id: String,
    #[serde(default)]
    pub subject: String,
}

/// Post author.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    pub nickname: Option<String>,
}

/// An attached image.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageEntry {
    pub url: Option<String>,
    #[serde(default)]
    pub format: String,
}

/// Accept either a JSON string or number for id-like fields.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}
