use crate::context::AppContext;
use crate::progress::ProgressType;
use anyhow::{bail, Result};
use application::adapters::InMemoryDocumentHead;
use application::services::{ManifestOrigin, ManifestSwapper};
use clap::Args;
use console::style;
use domain::{AnalyticsAction, ToolProfile};
use std::sync::Arc;

/// Сформировать tool-scoped web app manifest
#[derive(Debug, Args)]
pub struct ManifestCommand {
    /// Tool id
    pub tool: String,

    /// Display name (defaults to the tool id)
    #[arg(long)]
    pub name: Option<String>,

    /// Description used when the manifest is generated locally
    #[arg(long)]
    pub description: Option<String>,

    /// Print the data URL that would be installed instead of the descriptor
    #[arg(long)]
    pub href: bool,
}

impl ManifestCommand {
    pub async fn execute(&self, ctx: &AppContext) -> Result<()> {
        let subject = AppContext::subject(&self.tool)?;
        let mut profile =
            ToolProfile::new(subject.clone(), self.name.as_deref().unwrap_or(&self.tool));
        if let Some(description) = &self.description {
            profile = profile.with_description(description);
        }

        let head = InMemoryDocumentHead::with_link(&ctx.config().manifest.default_href);
        let swapper = ManifestSwapper::new(
            Arc::new(head),
            Arc::new(ctx.manifest_source()?),
            ctx.config().manifest.clone(),
        );

        let spinner = ProgressType::Fetch.create_spinner("Fetching manifest...");
        let installed = swapper.enter_tool(&profile).await;
        spinner.finish_and_clear();

        let Some(installed) = installed else {
            bail!("manifest for {subject} was not installed");
        };
        ctx.analytics()
            .track_event(&subject, AnalyticsAction::View, None);

        let origin = match installed.origin {
            ManifestOrigin::Remote => "remote",
            ManifestOrigin::Generated => "generated locally",
            ManifestOrigin::Static => "static",
        };
        eprintln!(
            "{} manifest for {} ({})",
            style("✓").green(),
            style(&subject).bold(),
            origin
        );

        if self.href {
            println!("{}", installed.link.href);
        } else if let Some(descriptor) = &installed.link.descriptor {
            println!("{}", serde_json::to_string_pretty(descriptor)?);
        }
        Ok(())
    }
}
