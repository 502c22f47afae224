use crate::value_objects::ManifestTheme;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for the directory client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub analytics: AnalyticsConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Backend-as-a-service endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// REST root, e.g. `https://project.example.co/rest/v1`
    #[serde(default = "default_rest_url")]
    pub rest_url: String,

    /// Serverless functions root serving `/manifest/{toolId}`
    #[serde(default = "default_functions_url")]
    pub functions_url: String,

    /// Public (anonymous) API key sent as `apikey` and bearer token
    #[serde(default)]
    pub anon_key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            rest_url: default_rest_url(),
            functions_url: default_functions_url(),
            anon_key: String::new(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_rest_url() -> String {
    "http://localhost:54321/rest/v1".to_string()
}

fn default_functions_url() -> String {
    "http://localhost:54321/functions/v1".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

/// Local persistent storage (the CLI's stand-in for browser localStorage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding all keys; `None` means the platform data dir
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Storage key under which the anonymous client id lives
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            namespace: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    "tooldir_client_id".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Site-wide manifest restored when leaving a tool view
    #[serde(default = "default_manifest_href")]
    pub default_href: String,

    #[serde(default)]
    pub theme: ManifestTheme,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            default_href: default_manifest_href(),
            theme: ManifestTheme::default(),
        }
    }
}

fn default_manifest_href() -> String {
    "/manifest.json".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
