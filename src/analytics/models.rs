//! Data models for click analytics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One recorded visit to a short link.
///
/// Events are immutable once created and only ever appended to a per-URL
/// log; they are removed as a whole when the owning entry is deleted or
/// expires, never individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Timestamp of the visit (epoch milliseconds)
    pub timestamp: i64,

    /// Raw user-agent header, empty when the client sent none
    pub user_agent: String,

    /// Raw referer header, empty means direct traffic
    pub referer: String,

    /// Client IP, informational only
    pub ip: String,

    /// Country resolved upstream (e.g. by an edge proxy), never computed here
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Browser label resolved at record time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Operating system label resolved at record time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Device class resolved at record time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

/// Entry of a frequency-ranked top-N list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopEntry {
    pub key: String,
    pub count: u64,
}

/// Derived summary over a sequence of click events.
///
/// Stateless value recomputed on demand by [`summarize`](crate::analytics::summarize);
/// it is never cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_clicks: u64,

    /// Clicks per UTC calendar date, keyed `YYYY-MM-DD`
    pub clicks_by_day: BTreeMap<String, u64>,

    /// Clicks per UTC hour of day (0-23)
    pub clicks_by_hour: BTreeMap<u8, u64>,

    /// Top 10 referers by descending frequency
    pub top_referers: Vec<TopEntry>,

    /// Top 10 resolved browser labels by descending frequency
    pub top_browsers: Vec<TopEntry>,

    /// Top 10 resolved countries by descending frequency
    pub top_countries: Vec<TopEntry>,

    /// `round(total_clicks / distinct days)`, 0 when there are no events
    pub avg_clicks_per_day: u64,
}
