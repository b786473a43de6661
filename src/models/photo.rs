//! Photo model matching the frontend Photo interface.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Caption given to uploads that arrive without one.
pub const DEFAULT_CAPTION: &str = "Captured Moment";

/// A gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    /// Remote URL or embedded data URL
    pub url: String,
    pub caption: String,
}

/// Request body for uploading a photo.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoRequest {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl UploadPhotoRequest {
    /// Turn the upload into a new photo record with a fresh id.
    pub fn into_photo(self) -> Result<Photo, AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::Validation("Photo url is required".to_string()));
        }

        let caption = self
            .caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CAPTION.to_string());

        Ok(Photo {
            id: uuid::Uuid::new_v4().to_string(),
            url: self.url,
            caption,
        })
    }
}
