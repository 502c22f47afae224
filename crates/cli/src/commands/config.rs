use anyhow::Result;
use clap::{Args, Subcommand};
use domain::config::DirectoryConfig;
use infrastructure::config::{ConfigLoader, ConfigSource, ConfigValidator};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show the resolved configuration (files + TOOLDIR_* environment)
    Show {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },

    /// Validate the resolved configuration
    #[command(alias = "check")]
    Validate,

    /// Write an example configuration file
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = ".tooldirrc.toml")]
        output: PathBuf,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl ConfigCommand {
    pub async fn execute(&self, loader: &ConfigLoader) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Show { json } => self.show_config(loader, *json).await,
            ConfigSubcommand::Validate => self.validate_config(loader).await,
            ConfigSubcommand::Init { output, force } => self.init_config(output, *force).await,
        }
    }

    async fn show_config(&self, loader: &ConfigLoader, json: bool) -> Result<()> {
        let (config, source) = loader.load_with_source().await?;

        match &source {
            ConfigSource::File(path) => println!("# Loaded from {}", path.display()),
            ConfigSource::Default => println!("# No config file found, showing defaults"),
        }

        let config = redact(config);
        let output = if json {
            serde_json::to_string_pretty(&config)?
        } else {
            toml::to_string_pretty(&config)?
        };
        println!("{output}");

        Ok(())
    }

    async fn validate_config(&self, loader: &ConfigLoader) -> Result<()> {
        info!("Validating configuration...");

        let config = loader.load().await?;
        match ConfigValidator::new().validate(&config) {
            Ok(()) => {
                println!("✅ Configuration is valid!");
                Ok(())
            }
            Err(e) => {
                println!("❌ Configuration validation failed:");
                println!("   {e}");
                Err(e)
            }
        }
    }

    async fn init_config(&self, output: &Path, force: bool) -> Result<()> {
        if output.exists() && !force {
            warn!("Configuration file already exists at: {}", output.display());
            println!(
                "❌ Configuration file already exists at {}",
                output.display()
            );
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let example_config = ConfigLoader::generate_example_config();
        let config: DirectoryConfig = toml::from_str(&example_config)?;
        ConfigLoader::new()
            .with_dotenv(false)
            .save_config(&config, output)
            .await?;

        println!("✅ Configuration initialized at {}", output.display());
        println!("🔧 Next steps:");
        println!("   1. Set backend.rest_url, backend.functions_url and backend.anon_key");
        println!("   2. Run 'tooldir config validate' to check your configuration");

        Ok(())
    }
}

/// Hide the anon key when printing
fn redact(mut config: DirectoryConfig) -> DirectoryConfig {
    if !config.backend.anon_key.is_empty() {
        config.backend.anon_key = "***".to_string();
    }
    config
}
