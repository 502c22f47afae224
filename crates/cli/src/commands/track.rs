use crate::context::AppContext;
use anyhow::{anyhow, Result};
use clap::Args;
use domain::AnalyticsAction;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Отправить analytics событие (fire-and-forget)
#[derive(Debug, Args)]
pub struct TrackCommand {
    /// Tool id
    pub tool: String,

    /// view, click, visit_website, affiliate_click, share, favorite,
    /// unfavorite, compare, chat_open, vote, comment
    pub action: String,

    /// Extra metadata as key=value (repeatable)
    #[arg(short, long = "meta", value_parser = parse_key_val)]
    pub metadata: Vec<(String, String)>,
}

impl TrackCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let subject = AppContext::subject(&self.tool)?;
        let action = AnalyticsAction::from_str(&self.action)?;

        let metadata = (!self.metadata.is_empty())
            .then(|| self.metadata.iter().cloned().collect::<BTreeMap<_, _>>());

        if ctx.analytics().track_event(&subject, action, metadata) {
            println!("{action} event queued for {subject}");
        } else if !ctx.config().analytics.enabled {
            println!("analytics disabled, {action} event not sent");
        } else {
            println!("{action} event dropped");
        }
        Ok(())
    }
}

/// Parse a single `key=value` pair
pub fn parse_key_val(raw: &str) -> Result<(String, String)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("metadata key cannot be empty in '{raw}'"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
