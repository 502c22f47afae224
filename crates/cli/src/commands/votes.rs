use crate::context::AppContext;
use crate::progress::ProgressType;
use anyhow::{bail, Result};
use application::services::{VoteOutcome, VoteUpdater};
use clap::{Args, ValueEnum};
use console::style;
use domain::{AnalyticsAction, VoteState, VoteType};
use std::collections::BTreeMap;
use tracing::info;

/// Показать счётчики голосов инструмента
#[derive(Debug, Args)]
pub struct VotesCommand {
    /// Tool id
    pub tool: String,

    /// Print machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

/// Проголосовать за инструмент (повторный голос снимает его)
#[derive(Debug, Args)]
pub struct VoteCommand {
    /// Tool id
    pub tool: String,

    #[arg(value_enum)]
    pub direction: VoteDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoteDirection {
    #[value(alias = "upvote")]
    Up,
    #[value(alias = "downvote")]
    Down,
}

impl From<VoteDirection> for VoteType {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => VoteType::Upvote,
            VoteDirection::Down => VoteType::Downvote,
        }
    }
}

fn build_updater(ctx: &AppContext, tool: &str) -> Result<VoteUpdater> {
    Ok(VoteUpdater::new(
        AppContext::subject(tool)?,
        ctx.client_id(),
        ctx.gateway(),
        ctx.notifier(),
    ))
}

impl VotesCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let updater = build_updater(ctx, &self.tool)?;

        let spinner = ProgressType::Fetch.create_spinner("Loading votes...");
        let loaded = updater.load().await;
        spinner.finish_and_clear();
        let state = loaded?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&state)?);
        } else {
            println!("{}", render_state(&self.tool, &state));
        }
        Ok(())
    }
}

impl VoteCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let updater = build_updater(ctx, &self.tool)?;
        let requested = VoteType::from(self.direction);

        let spinner = ProgressType::Request.create_spinner("Submitting vote...");
        let outcome = async {
            updater.load().await?;
            updater.vote(requested).await
        }
        .await;
        spinner.finish_and_clear();

        match outcome? {
            VoteOutcome::Reconciled(state) => {
                info!(tool = %self.tool, vote = %requested, "vote reconciled");

                let mut metadata = BTreeMap::new();
                metadata.insert(
                    "vote_type".to_string(),
                    state
                        .user_vote
                        .map(|vote| vote.as_str().to_string())
                        .unwrap_or_else(|| "none".to_string()),
                );
                ctx.analytics().track_event(
                    updater.subject(),
                    AnalyticsAction::Vote,
                    Some(metadata),
                );

                println!("{}", render_state(&self.tool, &state));
                Ok(())
            }
            VoteOutcome::RolledBack { restored, reason } => {
                println!("{}", render_state(&self.tool, &restored));
                bail!("vote was not saved: {reason}")
            }
            VoteOutcome::Discarded => bail!("vote was discarded"),
        }
    }
}

/// `midjourney  ▲ 12  ▼ 3  score 9  (you: upvote)`
pub fn render_state(tool: &str, state: &VoteState) -> String {
    let mine = match state.user_vote {
        Some(vote) => format!("  (you: {vote})"),
        None => String::new(),
    };

    format!(
        "{}  {} {}  {} {}  score {}{}",
        style(tool).bold(),
        style("▲").green(),
        state.upvotes,
        style("▼").red(),
        state.downvotes,
        state.score,
        mine
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_state() {
        console::set_colors_enabled(false);

        let state = VoteState {
            upvotes: 12,
            downvotes: 3,
            score: 9,
            user_vote: Some(VoteType::Upvote),
        };
        assert_eq!(
            render_state("midjourney", &state),
            "midjourney  ▲ 12  ▼ 3  score 9  (you: upvote)"
        );

        assert_eq!(
            render_state("midjourney", &VoteState::default()),
            "midjourney  ▲ 0  ▼ 0  score 0"
        );
    }

    #[test]
    fn test_direction_maps_to_vote_type() {
        assert_eq!(VoteType::from(VoteDirection::Up), VoteType::Upvote);
        assert_eq!(VoteType::from(VoteDirection::Down), VoteType::Downvote);
    }
}
