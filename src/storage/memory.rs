//! Process-lifetime in-memory registry
//!
//! The whole registry lives in a `DashMap`; nothing survives a restart.

use crate::analytics::ClickEvent;
use crate::models::ShortenedUrl;
use crate::storage::{Storage, StorageError, StorageResult};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

pub struct MemoryStorage {
    urls: DashMap<String, ShortenedUrl>,
    next_id: AtomicI64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            urls: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create(
        &self,
        short_code: &str,
        original_url: &str,
        custom_alias: Option<&str>,
        expires_at: Option<i64>,
    ) -> StorageResult<ShortenedUrl> {
        let url = ShortenedUrl {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            short_code: short_code.to_string(),
            original_url: original_url.to_string(),
            custom_alias: custom_alias.map(str::to_string),
            clicks: 0,
            created_at: Utc::now().timestamp_millis(),
            expires_at,
            click_log: Vec::new(),
        };

        // Entry keeps the existence check and the insert atomic
        match self.urls.entry(short_code.to_string()) {
            Entry::Occupied(_) => Err(StorageError::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(url.clone());
                Ok(url)
            }
        }
    }

    async fn get(&self, short_code: &str) -> Result<Option<ShortenedUrl>> {
        Ok(self.urls.get(short_code).map(|entry| entry.value().clone()))
    }

    async fn delete(&self, short_code: &str) -> Result<bool> {
        Ok(self.urls.remove(short_code).is_some())
    }

    async fn list(&self) -> Result<Vec<ShortenedUrl>> {
        let mut urls: Vec<ShortenedUrl> = self
            .urls
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // Newest first; id breaks created_at ties deterministically
        urls.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(urls)
    }

    async fn record_click(&self, short_code: &str, event: ClickEvent) -> Result<()> {
        // Entry may have been deleted or expired between lookup and record
        if let Some(mut entry) = self.urls.get_mut(short_code) {
            entry.clicks += 1;
            entry.click_log.push(event);
        }
        Ok(())
    }
}
