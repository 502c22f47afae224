use crate::context::AppContext;
use crate::progress::ProgressType;
use anyhow::Result;
use application::services::{NewsletterService, SubscribeOutcome};
use clap::Args;

/// Подписаться на рассылку
#[derive(Debug, Args)]
pub struct SubscribeCommand {
    pub email: String,

    /// Where the signup came from (e.g. "footer", "tool_page")
    #[arg(long)]
    pub source: Option<String>,
}

impl SubscribeCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let service = NewsletterService::new(ctx.gateway());

        let spinner = ProgressType::Request.create_spinner("Subscribing...");
        let outcome = service
            .subscribe(&self.email, self.source.as_deref())
            .await;

        match outcome {
            Ok(SubscribeOutcome::Subscribed { email }) => {
                spinner.finish_success(&format!("Subscribed {email}"));
            }
            Ok(SubscribeOutcome::AlreadySubscribed { email }) => {
                spinner.finish_success(&format!("{email} is already subscribed"));
            }
            Err(e) => {
                spinner.finish_error("Subscription failed");
                return Err(e.into());
            }
        }
        Ok(())
    }
}
