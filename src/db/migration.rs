//! Versioned decoding of persisted collections.
//!
//! Posts are first decoded strictly into the current shape. A payload that
//! does not fit is decoded as the legacy shape, written before posts carried
//! a category, and passed through [`migrate_legacy_post`]. Storage is not
//! rewritten here; the migrated shape is persisted by the next write.

use serde::Deserialize;

use crate::models::{Photo, Post, DEFAULT_CATEGORY};

/// Post record as written by earlier versions of the application.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPost {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Bring a legacy record up to the current post shape.
pub fn migrate_legacy_post(legacy: LegacyPost) -> Post {
    normalize_post(Post {
        id: legacy.id,
        title: legacy.title,
        excerpt: legacy.excerpt,
        content: legacy.content,
        cover_image: legacy.cover_image,
        date: legacy.date,
        tags: legacy.tags.unwrap_or_default(),
        category: legacy.category.unwrap_or_default(),
    })
}

/// Back-fill an empty category.
pub fn normalize_post(mut post: Post) -> Post {
    if post.category.is_empty() {
        post.category = DEFAULT_CATEGORY.to_string();
    }
    post
}

/// Decode a persisted posts payload, migrating older shapes.
pub fn decode_posts(payload: &str) -> Result<Vec<Post>, serde_json::Error> {
    match serde_json::from_str::<Vec<Post>>(payload) {
        Ok(posts) => Ok(posts.into_iter().map(normalize_post).collect()),
        Err(strict_err) => {
            tracing::debug!("Posts payload is not current shape ({}), migrating", strict_err);
            let legacy: Vec<LegacyPost> = serde_json::from_str(payload)?;
            Ok(legacy.into_iter().map(migrate_legacy_post).collect())
        }
    }
}

/// Decode a persisted photos payload.
pub fn decode_photos(payload: &str) -> Result<Vec<Photo>, serde_json::Error> {
    serde_json::from_str(payload)
}
