//! Repository for the posts and photos collections.
//!
//! Every collection is read, modified and written back as a whole. Operations
//! are serialized through a single lock so a read-modify-write never
//! interleaves with another.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::migration::{decode_photos, decode_posts};
use super::seed::{default_photos, default_posts};
use super::store::{KeyValueStore, PHOTOS_KEY, POSTS_KEY};
use crate::errors::AppError;
use crate::models::{Photo, Post};

/// Which collections a call to [`Repository::initialize`] had to seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub posts: bool,
    pub photos: bool,
}

/// Repository for all journal data.
pub struct Repository {
    store: Arc<dyn KeyValueStore>,
    lock: Mutex<()>,
}

impl Repository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Seed every collection that has no persisted data yet.
    pub async fn initialize(&self) -> Result<SeedReport, AppError> {
        let _guard = self.lock.lock().await;

        let (_, posts) = self.load_posts().await?;
        let (_, photos) = self.load_photos().await?;

        let report = SeedReport { posts, photos };
        tracing::info!(
            "Store initialized (seeded posts: {}, seeded photos: {})",
            report.posts,
            report.photos
        );
        Ok(report)
    }

    // ==================== POST OPERATIONS ====================

    /// List all posts, most recently created first.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        let _guard = self.lock.lock().await;
        let (posts, _) = self.load_posts().await?;
        Ok(posts)
    }

    /// Get a post by ID.
    pub async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let posts = self.list_posts().await?;
        Ok(posts.into_iter().find(|p| p.id == id))
    }

    /// Posts whose title, tags or category contain `query`, in list order.
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>, AppError> {
        let posts = self.list_posts().await?;
        Ok(posts.into_iter().filter(|p| p.matches(query)).collect())
    }

    /// Distinct categories in order of first appearance.
    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        let posts = self.list_posts().await?;
        let mut categories: Vec<String> = Vec::new();
        for post in posts {
            if !post.category.is_empty() && !categories.contains(&post.category) {
                categories.push(post.category);
            }
        }
        Ok(categories)
    }

    /// Insert a new post at the front, or replace the post with the same id in place.
    pub async fn save_post(&self, post: Post) -> Result<Post, AppError> {
        let _guard = self.lock.lock().await;
        let (mut posts, _) = self.load_posts().await?;

        match posts.iter().position(|p| p.id == post.id) {
            Some(index) => {
                tracing::debug!("Replacing post {} at position {}", post.id, index);
                posts[index] = post.clone();
            }
            None => {
                tracing::debug!("Inserting new post {}", post.id);
                posts.insert(0, post.clone());
            }
        }

        self.persist(POSTS_KEY, &posts).await?;
        Ok(post)
    }

    /// Delete a post. Deleting an unknown id leaves the collection unchanged.
    pub async fn delete_post(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let (mut posts, _) = self.load_posts().await?;

        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            tracing::debug!("Delete of unknown post {} is a no-op", id);
        }

        self.persist(POSTS_KEY, &posts).await
    }

    // ==================== PHOTO OPERATIONS ====================

    /// List all photos, most recent first.
    pub async fn list_photos(&self) -> Result<Vec<Photo>, AppError> {
        let _guard = self.lock.lock().await;
        let (photos, _) = self.load_photos().await?;
        Ok(photos)
    }

    /// Insert a photo at the front of the gallery.
    pub async fn save_photo(&self, photo: Photo) -> Result<Photo, AppError> {
        let _guard = self.lock.lock().await;
        let (mut photos, _) = self.load_photos().await?;

        photos.insert(0, photo.clone());

        self.persist(PHOTOS_KEY, &photos).await?;
        Ok(photo)
    }

    // ==================== LOADING ====================

    /// Load posts, seeding when absent or undecodable. Caller holds the lock.
    async fn load_posts(&self) -> Result<(Vec<Post>, bool), AppError> {
        if let Some(payload) = self.store.get(POSTS_KEY).await? {
            match decode_posts(&payload) {
                Ok(posts) => return Ok((posts, false)),
                Err(e) => tracing::warn!("Stored posts are corrupt, re-seeding: {}", e),
            }
        }

        let posts = default_posts();
        self.persist(POSTS_KEY, &posts).await?;
        tracing::info!("Seeded {} default posts", posts.len());
        Ok((posts, true))
    }

    /// Load photos, seeding when absent or undecodable. Caller holds the lock.
    async fn load_photos(&self) -> Result<(Vec<Photo>, bool), AppError> {
        if let Some(payload) = self.store.get(PHOTOS_KEY).await? {
            match decode_photos(&payload) {
                Ok(photos) => return Ok((photos, false)),
                Err(e) => tracing::warn!("Stored photos are corrupt, re-seeding: {}", e),
            }
        }

        let photos = default_photos();
        self.persist(PHOTOS_KEY, &photos).await?;
        tracing::info!("Seeded {} default photos", photos.len());
        Ok((photos, true))
    }

    async fn persist<T: Serialize>(&self, key: &str, records: &[T]) -> Result<(), AppError> {
        let payload = serde_json::to_string(records)
            .map_err(|e| AppError::Internal(format!("Failed to encode {}: {}", key, e)))?;
        self.store.set(key, &payload).await
    }
}
