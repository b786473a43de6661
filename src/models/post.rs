//! Post model matching the frontend BlogPost interface.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Category given to posts saved or stored without one.
pub const DEFAULT_CATEGORY: &str = "General";

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    /// Paragraphs separated by blank lines; a leading `>` marks a quotation
    pub content: String,
    /// Remote URL or embedded data URL
    pub cover_image: String,
    /// Calendar date, `YYYY-MM-DD`
    pub date: String,
    pub tags: Vec<String>,
    pub category: String,
}

impl Post {
    /// Whether the post matches a home page search query.
    ///
    /// Matching is a case-insensitive substring test against the title,
    /// every tag and the category. A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }

        self.title.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
            || self.category.to_lowercase().contains(&query)
    }
}

/// Request body for creating or updating a post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePostRequest {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to today's date when omitted
    #[serde(default)]
    pub date: Option<String>,
}

impl SavePostRequest {
    /// Validate required fields.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::Validation("Title is required".to_string()));
        }
        if self.excerpt.trim().is_empty() {
            return Err(AppError::Validation("Excerpt is required".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::Validation("Content is required".to_string()));
        }
        Ok(())
    }

    /// Build the post record stored under `id`.
    pub fn into_post(self, id: String) -> Result<Post, AppError> {
        self.validate()?;

        let cover_image = self
            .cover_image
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(placeholder_cover);

        let category = self
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let date = self
            .date
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());

        Ok(Post {
            id,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            cover_image,
            date,
            tags: normalize_tags(self.tags),
            category,
        })
    }
}

/// Trim tags, drop blanks and keep only the first occurrence of each.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

fn placeholder_cover() -> String {
    format!(
        "https://picsum.photos/800/600?random={}",
        Utc::now().timestamp_millis()
    )
}
