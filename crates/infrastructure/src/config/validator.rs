use anyhow::{bail, Result};
use domain::config::*;
use tracing::warn;

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, config: &DirectoryConfig) -> Result<()> {
        self.validate_backend_config(&config.backend)?;
        self.validate_storage_config(&config.storage)?;
        self.validate_manifest_config(&config.manifest)?;
        self.validate_logging_config(&config.logging)?;
        Ok(())
    }

    fn validate_backend_config(&self, config: &BackendConfig) -> Result<()> {
        Self::validate_url("backend.rest_url", &config.rest_url)?;
        Self::validate_url("backend.functions_url", &config.functions_url)?;

        if config.timeout_ms == 0 {
            bail!("backend.timeout_ms must be greater than 0");
        }

        if config.anon_key.trim().is_empty() {
            warn!("backend.anon_key is empty, requests will be rejected by a secured backend");
        }

        Ok(())
    }

    fn validate_url(name: &str, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            bail!("{} cannot be empty", name);
        }

        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"));

        match rest {
            Some(host) if !host.is_empty() && !host.starts_with('/') => Ok(()),
            Some(_) => bail!("{} has no host: '{}'", name, url),
            None => bail!("{} must be an http(s) URL, got '{}'", name, url),
        }
    }

    fn validate_storage_config(&self, config: &StorageConfig) -> Result<()> {
        if config.namespace.trim().is_empty() {
            bail!("storage.namespace cannot be empty");
        }

        if let Some(path) = &config.path {
            if path.is_dir() {
                bail!("storage.path points to a directory: {}", path.display());
            }
        } else {
            warn!("storage.path is not set, identity and favorites will not persist");
        }

        Ok(())
    }

    fn validate_manifest_config(&self, config: &ManifestConfig) -> Result<()> {
        if config.default_href.trim().is_empty() {
            bail!("manifest.default_href cannot be empty");
        }

        for (name, color) in [
            ("theme_color", &config.theme.theme_color),
            ("background_color", &config.theme.background_color),
        ] {
            if !color.starts_with('#') {
                warn!("manifest.theme.{} is not a hex color: {}", name, color);
            }
        }

        Ok(())
    }

    fn validate_logging_config(&self, config: &LoggingSettings) -> Result<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&config.level.to_lowercase().as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: {:?}",
                config.level,
                valid_levels
            );
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
