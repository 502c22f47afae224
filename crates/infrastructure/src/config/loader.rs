use crate::storage::FileKeyValueStore;
use anyhow::{Context, Result};
use domain::config::*;
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Default,
}

pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    env_prefix: String,
    load_dotenv: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            config_paths: Self::default_config_paths(),
            env_prefix: "TOOLDIR_".to_string(),
            load_dotenv: true,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.config_paths.insert(0, path);
        self
    }

    /// Replace the search list entirely (no home / cwd lookups)
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config_paths = paths;
        self
    }

    pub fn with_env_prefix(mut self, prefix: String) -> Self {
        self.env_prefix = prefix;
        self
    }

    pub fn with_dotenv(mut self, load_dotenv: bool) -> Self {
        self.load_dotenv = load_dotenv;
        self
    }

    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            // Current directory
            PathBuf::from(".tooldirrc.toml"),
            PathBuf::from("tooldir.toml"),
            PathBuf::from("tooldir.json"),
        ];

        // User home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".config").join("tooldir").join("config.toml"));
        }

        // Platform config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("tooldir").join("config.toml"));
        }

        paths
    }

    pub async fn load(&self) -> Result<DirectoryConfig> {
        Ok(self.load_with_source().await?.0)
    }

    /// Load config and report which file (if any) it came from
    pub async fn load_with_source(&self) -> Result<(DirectoryConfig, ConfigSource)> {
        if self.load_dotenv {
            // .env is optional
            if let Ok(path) = dotenv::dotenv() {
                debug!("Loaded environment from: {}", path.display());
            }
        }

        let (config, source) = self.load_base_config().await;
        let config = self.apply_env_overrides(config)?;

        Ok((config, source))
    }

    /// First readable file wins; unreadable ones are skipped with a warning
    async fn load_base_config(&self) -> (DirectoryConfig, ConfigSource) {
        for path in &self.config_paths {
            if !path.exists() {
                continue;
            }

            match self.load_file(path).await {
                Ok(file_config) => {
                    info!("Loaded configuration from: {}", path.display());
                    return (file_config, ConfigSource::File(path.clone()));
                }
                Err(e) => {
                    warn!("Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }

        debug!("No config file found, using defaults");
        (DirectoryConfig::default(), ConfigSource::Default)
    }

    async fn load_file(&self, path: &Path) -> Result<DirectoryConfig> {
        let content = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" | "" => toml::from_str(&content).context("Failed to parse TOML config"),
            "json" => serde_json::from_str(&content).context("Failed to parse JSON config"),
            _ => {
                // Try TOML first, then JSON
                toml::from_str(&content)
                    .or_else(|_| serde_json::from_str(&content))
                    .context("Failed to parse config file")
            }
        }
    }

    fn env_var(&self, name: &str) -> Option<String> {
        env::var(format!("{}{}", self.env_prefix, name)).ok()
    }

    fn apply_env_overrides(&self, mut config: DirectoryConfig) -> Result<DirectoryConfig> {
        // Backend
        if let Some(url) = self.env_var("REST_URL") {
            config.backend.rest_url = url;
        }

        if let Some(url) = self.env_var("FUNCTIONS_URL") {
            config.backend.functions_url = url;
        }

        if let Some(key) = self.env_var("ANON_KEY") {
            config.backend.anon_key = key;
        }

        if let Some(timeout) = self.env_var("TIMEOUT_MS") {
            config.backend.timeout_ms = timeout
                .parse()
                .with_context(|| format!("{}TIMEOUT_MS is not a number: {timeout}", self.env_prefix))?;
        }

        // Storage
        if let Some(path) = self.env_var("STORAGE_PATH") {
            config.storage.path = Some(PathBuf::from(path));
        }

        if let Some(namespace) = self.env_var("NAMESPACE") {
            config.storage.namespace = namespace;
        }

        // Analytics
        if let Some(enabled) = self.env_var("ANALYTICS_ENABLED") {
            config.analytics.enabled = parse_flag(&enabled);
        }

        // Manifest
        if let Some(href) = self.env_var("MANIFEST_HREF") {
            config.manifest.default_href = href;
        }

        // Logging
        if let Some(level) = self.env_var("LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = self.env_var("LOG_JSON") {
            config.logging.json = parse_flag(&json);
        }

        Ok(config)
    }

    pub async fn save_config(&self, config: &DirectoryConfig, path: &Path) -> Result<()> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("toml");

        let content = match extension {
            "json" => serde_json::to_string_pretty(config)?,
            _ => toml::to_string_pretty(config)?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        fs::write(path, content).await?;
        info!("Configuration saved to: {}", path.display());

        Ok(())
    }

    pub fn generate_example_config() -> String {
        let config = DirectoryConfig {
            backend: BackendConfig {
                rest_url: "https://your-project.example.co/rest/v1".to_string(),
                functions_url: "https://your-project.example.co/functions/v1".to_string(),
                anon_key: "your-anon-key-here".to_string(),
                timeout_ms: 10_000,
            },
            storage: StorageConfig {
                path: FileKeyValueStore::default_path(),
                namespace: "tooldir_client_id".to_string(),
            },
            ..DirectoryConfig::default()
        };

        toml::to_string_pretty(&config)
            .unwrap_or_else(|_| "Failed to generate example config".to_string())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
