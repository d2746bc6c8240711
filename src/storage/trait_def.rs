use crate::analytics::ClickEvent;
use crate::models::ShortenedUrl;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("short code already exists")]
    Conflict,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

#[async_trait]
pub trait Storage: Send + Sync {
    /// Create a new shortened URL under the given code
    async fn create(
        &self,
        short_code: &str,
        original_url: &str,
        custom_alias: Option<&str>,
        expires_at: Option<i64>,
    ) -> StorageResult<ShortenedUrl>;

    /// Get a shortened URL by short code, click log included
    async fn get(&self, short_code: &str) -> Result<Option<ShortenedUrl>>;

    /// Delete a shortened URL and its click log, returns whether it existed
    async fn delete(&self, short_code: &str) -> Result<bool>;

    /// List all URLs, newest first
    async fn list(&self) -> Result<Vec<ShortenedUrl>>;

    /// Increment the click counter and append the event to the log
    async fn record_click(&self, short_code: &str, event: ClickEvent) -> Result<()>;
}
