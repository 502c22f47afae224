//! AttributionParams - last-seen campaign / affiliate parameters
//!
//! Захватываются из query string посадочной страницы и прикрепляются
//! к каждому analytics event как metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Campaign parameters captured from a landing URL (last touch wins)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_content: Option<String>,
    /// Affiliate / referral code (`ref=` query parameter)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral: Option<String>,
}

impl AttributionParams {
    /// Query parameter names recognised as attribution
    pub const KEYS: [&'static str; 6] = [
        "utm_source",
        "utm_medium",
        "utm_campaign",
        "utm_term",
        "utm_content",
        "ref",
    ];

    /// Set a parameter by its query-string name. Unknown names and blank values are ignored.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }

        let slot = match key {
            "utm_source" => &mut self.utm_source,
            "utm_medium" => &mut self.utm_medium,
            "utm_campaign" => &mut self.utm_campaign,
            "utm_term" => &mut self.utm_term,
            "utm_content" => &mut self.utm_content,
            "ref" => &mut self.referral,
            _ => return false,
        };
        *slot = Some(value.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.utm_source.is_none()
            && self.utm_medium.is_none()
            && self.utm_campaign.is_none()
            && self.utm_term.is_none()
            && self.utm_content.is_none()
            && self.referral.is_none()
    }

    /// Flatten into analytics metadata entries, keyed by query-string name
    pub fn to_metadata(&self) -> BTreeMap<String, String> {
        let pairs = [
            ("utm_source", &self.utm_source),
            ("utm_medium", &self.utm_medium),
            ("utm_campaign", &self.utm_campaign),
            ("utm_term", &self.utm_term),
            ("utm_content", &self.utm_content),
            ("ref", &self.referral),
        ];

        pairs
            .into_iter()
            .filter_map(|(key, value)| value.as_ref().map(|v| (key.to_string(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_and_unknown_keys() {
        let mut params = AttributionParams::default();
        assert!(params.is_empty());

        assert!(params.set("utm_source", "newsletter"));
        assert!(params.set("ref", "partner42"));
        assert!(!params.set("utm_source_extra", "x"));
        assert!(!params.set("utm_medium", "   "));

        assert_eq!(params.utm_source.as_deref(), Some("newsletter"));
        assert_eq!(params.referral.as_deref(), Some("partner42"));
        assert!(params.utm_medium.is_none());
    }

    #[test]
    fn test_to_metadata_skips_missing() {
        let mut params = AttributionParams::default();
        params.set("utm_campaign", "launch");

        let metadata = params.to_metadata();
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get("utm_campaign").map(String::as_str), Some("launch"));
    }
}
