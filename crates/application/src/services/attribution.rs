//! Attribution Tracker
//!
//! Last-touch campaign attribution: каждый заход с `utm_*`/`ref`
//! параметрами перезаписывает сохранённые значения.

use crate::ports::KeyValueStore;
use domain::AttributionParams;
use std::sync::Arc;
use tracing::{info, warn};

pub const ATTRIBUTION_KEY: &str = "tooldir_attribution";

pub struct AttributionTracker {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl AttributionTracker {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(store, ATTRIBUTION_KEY)
    }

    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Capture parameters from a landing URL or bare query string.
    ///
    /// Returns the captured params when at least one attribution key was present.
    pub fn capture_from_query(&self, url_or_query: &str) -> Option<AttributionParams> {
        let params = parse_query(url_or_query);
        if params.is_empty() {
            return None;
        }

        match serde_json::to_string(&params) {
            Ok(json) => {
                if let Err(e) = self.store.set(&self.key, &json) {
                    warn!(error = %e, "failed to persist attribution params");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize attribution params"),
        }

        info!(source = ?params.utm_source, campaign = ?params.utm_campaign, "attribution captured");
        Some(params)
    }

    /// Last captured params, empty when none (or unreadable)
    pub fn current(&self) -> AttributionParams {
        match self.store.get(&self.key) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!(error = %e, "stored attribution params are corrupt");
                AttributionParams::default()
            }),
            Ok(None) => AttributionParams::default(),
            Err(e) => {
                warn!(error = %e, "attribution params unavailable");
                AttributionParams::default()
            }
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(error = %e, "failed to clear attribution params");
        }
    }
}

fn parse_query(url_or_query: &str) -> AttributionParams {
    let without_fragment = url_or_query.split('#').next().unwrap_or_default();
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => without_fragment,
    };

    let mut params = AttributionParams::default();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        if let (Some(key), Some(value)) = (decode_component(key), decode_component(value)) {
            params.set(&key, &value);
        }
    }
    params
}

fn decode_component(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .map(|decoded| decoded.into_owned())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryKeyValueStore;

    #[test]
    fn test_capture_from_full_url() {
        let tracker = AttributionTracker::new(Arc::new(InMemoryKeyValueStore::new()));
        let params = tracker
            .capture_from_query(
                "https://example.com/tools/x?utm_source=twitter&utm_campaign=spring%20launch&page=2#top",
            )
            .unwrap();

        assert_eq!(params.utm_source.as_deref(), Some("twitter"));
        assert_eq!(params.utm_campaign.as_deref(), Some("spring launch"));
        assert_eq!(tracker.current(), params);
    }

    #[test]
    fn test_query_without_attribution_keeps_previous() {
        let tracker = AttributionTracker::new(Arc::new(InMemoryKeyValueStore::new()));
        tracker.capture_from_query("?ref=partner+one");

        assert!(tracker.capture_from_query("?page=3&sort=top").is_none());
        assert_eq!(tracker.current().referral.as_deref(), Some("partner one"));
    }

    #[test]
    fn test_last_touch_replaces_all_params() {
        let tracker = AttributionTracker::new(Arc::new(InMemoryKeyValueStore::new()));
        tracker.capture_from_query("utm_source=google&utm_medium=cpc");
        tracker.capture_from_query("utm_source=newsletter");

        let current = tracker.current();
        assert_eq!(current.utm_source.as_deref(), Some("newsletter"));
        assert!(current.utm_medium.is_none());
    }

    #[test]
    fn test_unavailable_storage_yields_empty_params() {
        let tracker = AttributionTracker::new(Arc::new(InMemoryKeyValueStore::unavailable()));
        assert!(tracker.capture_from_query("utm_source=x").is_some());
        assert!(tracker.current().is_empty());
    }
}
