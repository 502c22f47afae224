use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::commands::{
    AttributionCommand, CommentCommand, CommentsCommand, ConfigCommand, FavoriteCommand,
    IdentityCommand, ManifestCommand, SubscribeCommand, TrackCommand, VoteCommand, VotesCommand,
};
use cli::AppContext;
use common::{init_structured_logging, LoggingConfig};
use infrastructure::config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser)]
#[command(name = "tooldir")]
#[command(about = "Tool directory client: votes, favorites, comments, analytics, manifests")]
#[command(version)]
struct Cli {
    /// Config file to use before the default search paths
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON log lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Показать anonymous client id
    Identity(IdentityCommand),
    /// Счётчики голосов инструмента
    Votes(VotesCommand),
    /// Проголосовать (повтор снимает голос)
    Vote(VoteCommand),
    /// Избранное
    #[command(visible_alias = "fav")]
    Favorite(FavoriteCommand),
    /// Отправить analytics событие
    Track(TrackCommand),
    /// Сохранить campaign attribution
    Attribution(AttributionCommand),
    /// Tool-scoped web app manifest
    Manifest(ManifestCommand),
    /// Подписка на рассылку
    Subscribe(SubscribeCommand),
    /// Комментарии инструмента
    Comments(CommentsCommand),
    /// Оставить комментарий
    Comment(CommentCommand),
    /// Управление конфигурацией
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let config = loader.load().await?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_structured_logging(LoggingConfig::from_settings(
        level,
        cli.log_json || config.logging.json,
    ))?;

    // Config commands run without validation
    if let Commands::Config(command) = &cli.command {
        return command.execute(&loader).await;
    }

    ConfigValidator::new()
        .validate(&config)
        .context("Invalid configuration (see 'tooldir config validate')")?;
    let ctx = AppContext::new(config)?;

    let result = match &cli.command {
        Commands::Identity(command) => command.execute(&ctx),
        Commands::Votes(command) => command.execute(&ctx).await,
        Commands::Vote(command) => command.execute(&ctx).await,
        Commands::Favorite(command) => command.execute(&ctx),
        Commands::Track(command) => command.execute(&ctx),
        Commands::Attribution(command) => command.execute(&ctx),
        Commands::Manifest(command) => command.execute(&ctx).await,
        Commands::Subscribe(command) => command.execute(&ctx).await,
        Commands::Comments(command) => command.execute(&ctx).await,
        Commands::Comment(command) => command.execute(&ctx).await,
        Commands::Config(_) => Ok(()),
    };

    // Wait for the last analytics send before exit
    ctx.analytics().flush().await;
    debug!("analytics flushed");

    result
}
