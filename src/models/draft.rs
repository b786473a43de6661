//! In-progress editor state used by the preview and generation endpoints.

use serde::{Deserialize, Serialize};

/// An unsaved post as held by the admin editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
}

impl Draft {
    /// Append generated text for `topic`, filling a blank title and excerpt.
    pub fn apply_generated(&mut self, topic: &str, text: &str) {
        if self.content.is_empty() {
            self.content = text.to_string();
        } else {
            self.content = format!("{}\n\n{}", self.content, text);
        }

        if self.title.is_empty() {
            self.title = format!("Reflections on {}", topic);
        }
        if self.excerpt.is_empty() {
            self.excerpt = format!("A short exploration of {}...", topic);
        }
    }
}

/// Request body for generating draft content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub topic: String,
    #[serde(default)]
    pub draft: Draft,
}

/// Request body for previewing draft content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub content: String,
}
