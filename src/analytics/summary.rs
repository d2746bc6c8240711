//! Single-pass click-event summarization
//!
//! [`summarize`] folds an ordered event sequence into an
//! [`AnalyticsSummary`] in O(n) time with auxiliary space proportional to
//! the number of distinct days, hours, referers, browsers and countries.
//!
//! The frequency maps behind the top-10 lists are insertion-ordered
//! (`IndexMap`), so the stable sort breaks count ties in favor of the
//! first-encountered key.

use chrono::{DateTime, Timelike, Utc};
use indexmap::IndexMap;
use std::collections::BTreeMap;

use crate::analytics::models::{AnalyticsSummary, ClickEvent, TopEntry};

/// Sentinel referer label for direct traffic.
pub const DIRECT_REFERER: &str = "Direct";

/// Maximum entries kept in each top list.
const TOP_LIMIT: usize = 10;

/// Summarize a sequence of click events.
///
/// Pure: reads a snapshot, mutates nothing, retains nothing. An empty
/// input yields an all-zero summary with empty mappings.
pub fn summarize(clicks: &[ClickEvent]) -> AnalyticsSummary {
    let mut clicks_by_day: BTreeMap<String, u64> = BTreeMap::new();
    let mut clicks_by_hour: BTreeMap<u8, u64> = BTreeMap::new();
    let mut referer_counts: IndexMap<String, u64> = IndexMap::new();
    let mut browser_counts: IndexMap<String, u64> = IndexMap::new();
    let mut country_counts: IndexMap<String, u64> = IndexMap::new();

    for click in clicks {
        // Out-of-range timestamps clamp to the epoch
        let at = DateTime::<Utc>::from_timestamp_millis(click.timestamp).unwrap_or_default();

        *clicks_by_day
            .entry(at.format("%Y-%m-%d").to_string())
            .or_insert(0) += 1;
        *clicks_by_hour.entry(at.hour() as u8).or_insert(0) += 1;

        let referer = if click.referer.is_empty() {
            DIRECT_REFERER
        } else {
            click.referer.as_str()
        };
        *referer_counts.entry(referer.to_string()).or_insert(0) += 1;

        // Unresolved events do not contribute; classification is the
        // caller's responsibility at record time.
        if let Some(browser) = &click.browser {
            *browser_counts.entry(browser.clone()).or_insert(0) += 1;
        }
        if let Some(country) = &click.country {
            *country_counts.entry(country.clone()).or_insert(0) += 1;
        }
    }

    let total_clicks = clicks.len() as u64;
    // Divisor floored at 1; half values round away from zero
    let avg_clicks_per_day =
        (total_clicks as f64 / clicks_by_day.len().max(1) as f64).round() as u64;

    AnalyticsSummary {
        total_clicks,
        clicks_by_day,
        clicks_by_hour,
        top_referers: top_entries(referer_counts),
        top_browsers: top_entries(browser_counts),
        top_countries: top_entries(country_counts),
        avg_clicks_per_day,
    }
}

/// Rank an insertion-ordered frequency map into a top-10 list.
///
/// `sort_by` is stable, so equal counts keep first-insertion order.
fn top_entries(counts: IndexMap<String, u64>) -> Vec<TopEntry> {
    let mut entries: Vec<TopEntry> = counts
        .into_iter()
        .map(|(key, count)| TopEntry { key, count })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries.truncate(TOP_LIMIT);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-15T10:30:00Z
    const DAY1_MORNING: i64 = 1_705_314_600_000;
    // 2024-01-15T18:00:00Z
    const DAY1_EVENING: i64 = 1_705_341_600_000;
    // 2024-01-16T23:00:00Z
    const DAY2_NIGHT: i64 = 1_705_446_000_000;

    fn event(timestamp: i64, referer: &str) -> ClickEvent {
        ClickEvent {
            timestamp,
            user_agent: String::new(),
            referer: referer.to_string(),
            ip: "127.0.0.1".to_string(),
            country: None,
            browser: None,
            os: None,
            device: None,
        }
    }

    #[test]
    fn empty_input_yields_zero_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_clicks, 0);
        assert!(summary.clicks_by_day.is_empty());
        assert!(summary.clicks_by_hour.is_empty());
        assert!(summary.top_referers.is_empty());
        assert!(summary.top_browsers.is_empty());
        assert!(summary.top_countries.is_empty());
        assert_eq!(summary.avg_clicks_per_day, 0);
    }

    #[test]
    fn buckets_and_average_over_two_days() {
        let clicks = vec![
            event(DAY1_MORNING, ""),
            event(DAY1_EVENING, "google.com"),
            event(DAY2_NIGHT, "google.com"),
        ];
        let summary = summarize(&clicks);

        assert_eq!(summary.total_clicks, 3);
        assert_eq!(summary.clicks_by_day.get("2024-01-15"), Some(&2));
        assert_eq!(summary.clicks_by_day.get("2024-01-16"), Some(&1));
        assert_eq!(summary.clicks_by_hour.get(&10), Some(&1));
        assert_eq!(summary.clicks_by_hour.get(&18), Some(&1));
        assert_eq!(summary.clicks_by_hour.get(&23), Some(&1));

        assert_eq!(
            summary.top_referers,
            vec![
                TopEntry {
                    key: "google.com".to_string(),
                    count: 2
                },
                TopEntry {
                    key: DIRECT_REFERER.to_string(),
                    count: 1
                },
            ]
        );

        // round(3 / 2) = 2
        assert_eq!(summary.avg_clicks_per_day, 2);
    }

    #[test]
    fn every_event_lands_in_exactly_one_day_and_hour_bucket() {
        let clicks: Vec<ClickEvent> = (0..50)
            .map(|i| event(DAY1_MORNING + i * 3_600_000, ""))
            .collect();
        let summary = summarize(&clicks);

        assert_eq!(summary.total_clicks, 50);
        assert_eq!(summary.clicks_by_day.values().sum::<u64>(), 50);
        assert_eq!(summary.clicks_by_hour.values().sum::<u64>(), 50);
        assert!(summary.clicks_by_hour.keys().all(|hour| *hour < 24));
    }

    #[test]
    fn empty_referer_normalizes_to_direct() {
        let summary = summarize(&[event(DAY1_MORNING, "")]);
        assert_eq!(summary.top_referers.len(), 1);
        assert_eq!(summary.top_referers[0].key, DIRECT_REFERER);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let clicks = vec![
            event(DAY1_MORNING, "a.example"),
            event(DAY1_MORNING, "b.example"),
            event(DAY1_MORNING, "c.example"),
            event(DAY1_MORNING, "b.example"),
        ];
        let summary = summarize(&clicks);

        let keys: Vec<&str> = summary
            .top_referers
            .iter()
            .map(|entry| entry.key.as_str())
            .collect();
        // b.example wins on count; a and c tie at 1 and keep insertion order
        assert_eq!(keys, vec!["b.example", "a.example", "c.example"]);
    }

    #[test]
    fn top_lists_truncate_to_ten_in_insertion_order() {
        let clicks: Vec<ClickEvent> = (0..11)
            .map(|i| event(DAY1_MORNING, &format!("site-{i}.example")))
            .collect();
        let summary = summarize(&clicks);

        assert_eq!(summary.top_referers.len(), 10);
        for (i, entry) in summary.top_referers.iter().enumerate() {
            assert_eq!(entry.key, format!("site-{i}.example"));
            assert_eq!(entry.count, 1);
        }
    }

    #[test]
    fn unresolved_events_do_not_count_toward_browsers_or_countries() {
        let mut resolved = event(DAY1_MORNING, "");
        resolved.browser = Some("Chrome".to_string());
        resolved.country = Some("DE".to_string());

        let summary = summarize(&[resolved, event(DAY1_EVENING, "")]);

        assert_eq!(summary.total_clicks, 2);
        assert_eq!(summary.top_browsers.len(), 1);
        assert_eq!(summary.top_browsers[0].key, "Chrome");
        assert_eq!(summary.top_browsers[0].count, 1);
        assert_eq!(summary.top_countries.len(), 1);
        assert_eq!(summary.top_countries[0].key, "DE");
    }

    #[test]
    fn single_day_average_is_exact() {
        let clicks = vec![event(DAY1_MORNING, ""), event(DAY1_EVENING, "")];
        assert_eq!(summarize(&clicks).avg_clicks_per_day, 2);
    }

    #[test]
    fn half_values_round_up() {
        // 5 clicks over 2 days: round(2.5) = 3
        let clicks = vec![
            event(DAY1_MORNING, ""),
            event(DAY1_MORNING, ""),
            event(DAY1_MORNING, ""),
            event(DAY2_NIGHT, ""),
            event(DAY2_NIGHT, ""),
        ];
        assert_eq!(summarize(&clicks).avg_clicks_per_day, 3);
    }
}
