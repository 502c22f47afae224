use crate::context::AppContext;
use anyhow::Result;
use clap::Args;
use tracing::info;

/// Показать anonymous client id этой установки
#[derive(Debug, Args)]
pub struct IdentityCommand {
    /// Forget the stored id and issue a new one
    #[arg(long)]
    pub reset: bool,
}

impl IdentityCommand {
    pub fn execute(&self, ctx: &AppContext) -> Result<()> {
        let namespace = &ctx.config().storage.namespace;

        if self.reset {
            ctx.identity().reset(namespace);
            info!(namespace = %namespace, "client id reset");
        }

        println!("{}", ctx.client_id());
        Ok(())
    }
}
