use crate::context::AppContext;
use anyhow::Result;
use clap::Args;
use console::style;

/// Сохранить utm_* / ref параметры из landing URL (last-touch)
#[derive(Debug, Args)]
pub struct AttributionCommand {
    /// Landing URL or query string, e.g. "?utm_source=newsletter&ref=friend"
    pub query: Option<String>,

    /// Forget stored attribution
    #[arg(long, conflicts_with = "query")]
    pub clear: bool,
}

impl AttributionCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let tracker = ctx.attribution();

        if self.clear {
            tracker.clear();
            println!("Attribution cleared");
            return Ok(());
        }

        if let Some(query) = &self.query {
            if tracker.capture_from_query(query).is_none() {
                println!(
                    "{}",
                    style("No attribution parameters found, keeping previous values").dim()
                );
            }
        }

        let current = tracker.current();
        if current.is_empty() {
            println!("{}", style("No attribution stored").dim());
        }
        for (key, value) in current.to_metadata() {
            println!("{key}={value}");
        }
        Ok(())
    }
}
