use serde::{Deserialize, Serialize};

use crate::analytics::ClickEvent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortenedUrl {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub clicks: u64,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds; None never expires
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub click_log: Vec<ClickEvent>,
}

impl ShortenedUrl {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|at| now_ms > at)
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub url: String,
    pub alias: Option<String>,
    /// Lifetime in seconds from creation
    pub expires_in: Option<i64>,
}
