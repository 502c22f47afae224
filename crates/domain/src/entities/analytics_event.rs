//! AnalyticsEvent - fire-and-forget interaction record

use crate::entities::ClientIdentity;
use crate::errors::DomainError;
use crate::value_objects::SubjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Tracked interaction kinds (snake_case on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsAction {
    View,
    Click,
    VisitWebsite,
    AffiliateClick,
    Share,
    Favorite,
    Unfavorite,
    Compare,
    ChatOpen,
    Vote,
    Comment,
}

impl AnalyticsAction {
    pub const ALL: [AnalyticsAction; 11] = [
        AnalyticsAction::View,
        AnalyticsAction::Click,
        AnalyticsAction::VisitWebsite,
        AnalyticsAction::AffiliateClick,
        AnalyticsAction::Share,
        AnalyticsAction::Favorite,
        AnalyticsAction::Unfavorite,
        AnalyticsAction::Compare,
        AnalyticsAction::ChatOpen,
        AnalyticsAction::Vote,
        AnalyticsAction::Comment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalyticsAction::View => "view",
            AnalyticsAction::Click => "click",
            AnalyticsAction::VisitWebsite => "visit_website",
            AnalyticsAction::AffiliateClick => "affiliate_click",
            AnalyticsAction::Share => "share",
            AnalyticsAction::Favorite => "favorite",
            AnalyticsAction::Unfavorite => "unfavorite",
            AnalyticsAction::Compare => "compare",
            AnalyticsAction::ChatOpen => "chat_open",
            AnalyticsAction::Vote => "vote",
            AnalyticsAction::Comment => "comment",
        }
    }
}

impl fmt::Display for AnalyticsAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalyticsAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == wanted)
            .ok_or_else(|| DomainError::InvalidAnalyticsAction(s.to_string()))
    }
}

/// One analytics record as handed to the sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub subject_id: SubjectId,
    pub action: AnalyticsAction,
    pub metadata: BTreeMap<String, String>,
    pub timestamp: DateTime<Utc>,
    pub client_id: Option<ClientIdentity>,
}

impl AnalyticsEvent {
    pub fn new(subject_id: SubjectId, action: AnalyticsAction) -> Self {
        Self {
            subject_id,
            action,
            metadata: BTreeMap::new(),
            timestamp: Utc::now(),
            client_id: None,
        }
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_client(mut self, client_id: ClientIdentity) -> Self {
        self.client_id = Some(client_id);
        self
    }
}
