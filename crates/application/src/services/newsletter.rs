//! Newsletter subscription with client-side email validation

use crate::ports::NewsletterGateway;
use crate::{ApplicationError, ApplicationResult};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed { email: String },
    AlreadySubscribed { email: String },
}

pub struct NewsletterService {
    gateway: Arc<dyn NewsletterGateway>,
}

impl NewsletterService {
    pub fn new(gateway: Arc<dyn NewsletterGateway>) -> Self {
        Self { gateway }
    }

    /// Validate and normalize an address (trimmed, lowercase)
    pub fn normalize_email(raw: &str) -> ApplicationResult<String> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApplicationError::validation("email address is required"));
        }
        if !validator::validate_email(email.as_str()) {
            return Err(ApplicationError::validation(format!(
                "'{email}' is not a valid email address"
            )));
        }
        Ok(email)
    }

    #[instrument(skip(self, raw_email))]
    pub async fn subscribe(
        &self,
        raw_email: &str,
        source: Option<&str>,
    ) -> ApplicationResult<SubscribeOutcome> {
        let email = Self::normalize_email(raw_email)?;

        match self.gateway.subscribe(&email, source).await {
            Ok(()) => {
                info!("newsletter subscription created");
                Ok(SubscribeOutcome::Subscribed { email })
            }
            Err(e) if e.is_conflict() => {
                info!("address already subscribed");
                Ok(SubscribeOutcome::AlreadySubscribed { email })
            }
            Err(e) => Err(ApplicationError::gateway("newsletter subscribe", e)),
        }
    }
}
