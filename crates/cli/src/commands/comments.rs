use crate::context::AppContext;
use crate::progress::ProgressType;
use anyhow::{bail, Result};
use application::services::{CommentThread, PostOutcome};
use clap::Args;
use console::style;
use domain::{AnalyticsAction, Comment};

/// Показать комментарии (новые сверху)
#[derive(Debug, Args)]
pub struct CommentsCommand {
    /// Tool id
    pub tool: String,

    /// Show at most this many comments
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

/// Оставить комментарий
#[derive(Debug, Args)]
pub struct CommentCommand {
    /// Tool id
    pub tool: String,

    /// Comment text (1..=2000 characters)
    pub text: String,

    /// Display name; anonymous when omitted
    #[arg(short, long)]
    pub author: Option<String>,
}

fn build_thread(ctx: &AppContext, tool: &str) -> Result<CommentThread> {
    Ok(CommentThread::new(
        AppContext::subject(tool)?,
        ctx.client_id(),
        ctx.gateway(),
        ctx.notifier(),
    ))
}

impl CommentsCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let thread = build_thread(ctx, &self.tool)?;

        let spinner = ProgressType::Fetch.create_spinner("Loading comments...");
        let loaded = thread.load().await;
        spinner.finish_and_clear();
        let comments = loaded?;

        if comments.is_empty() {
            println!("{}", style("No comments yet").dim());
        }
        for comment in comments.iter().take(self.limit) {
            println!("{}", render_comment(comment));
        }
        if comments.len() > self.limit {
            println!(
                "{}",
                style(format!("... {} more", comments.len() - self.limit)).dim()
            );
        }
        Ok(())
    }
}

impl CommentCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let thread = build_thread(ctx, &self.tool)?;

        let spinner = ProgressType::Request.create_spinner("Posting comment...");
        let outcome = thread.post(&self.text, self.author.clone()).await;
        spinner.finish_and_clear();

        match outcome? {
            PostOutcome::Posted(comment) => {
                ctx.analytics()
                    .track_event(&comment.subject_id, AnalyticsAction::Comment, None);
                println!("{}", render_comment(&comment));
                Ok(())
            }
            PostOutcome::RolledBack { reason } => bail!("comment was not saved: {reason}"),
            PostOutcome::Discarded => bail!("comment was discarded"),
        }
    }
}

pub fn render_comment(comment: &Comment) -> String {
    format!(
        "{} {}\n  {}",
        style(comment.display_author()).bold(),
        style(comment.created_at.format("%Y-%m-%d %H:%M")).dim(),
        comment.content
    )
}
