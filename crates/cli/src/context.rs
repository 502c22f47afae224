//! Application context
//!
//! Собирает adapters один раз на запуск: storage (JSON файл, по умолчанию
//! в data dir платформы), REST gateway, notifier, identity и analytics
//! dispatcher.

use crate::notifier::ConsoleNotifier;
use anyhow::{Context, Result};
use application::adapters::InMemoryKeyValueStore;
use application::ports::{KeyValueStore, UserNotifier};
use application::services::{AnalyticsDispatcher, AttributionTracker, IdentityResolver};
use domain::config::DirectoryConfig;
use domain::{ClientIdentity, SubjectId};
use infrastructure::{FileKeyValueStore, HttpManifestSource, RestGateway};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AppContext {
    config: DirectoryConfig,
    store: Arc<dyn KeyValueStore>,
    gateway: Arc<RestGateway>,
    notifier: Arc<dyn UserNotifier>,
    identity: Arc<IdentityResolver>,
    attribution: Arc<AttributionTracker>,
    analytics: AnalyticsDispatcher,
}

impl AppContext {
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let store = Self::open_store(&config);
        Self::with_store(config, store, Arc::new(ConsoleNotifier::stderr()))
    }

    /// Configured file, else the platform data dir, else memory only
    fn open_store(config: &DirectoryConfig) -> Arc<dyn KeyValueStore> {
        let path = config
            .storage
            .path
            .clone()
            .or_else(FileKeyValueStore::default_path);

        match path {
            Some(path) => {
                debug!(path = %path.display(), "using file storage");
                Arc::new(FileKeyValueStore::open(path))
            }
            None => {
                warn!("no data directory found, identity and favorites are kept in memory");
                Arc::new(InMemoryKeyValueStore::new())
            }
        }
    }

    pub fn with_store(
        config: DirectoryConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Result<Self> {
        let gateway =
            Arc::new(RestGateway::new(&config.backend).context("Failed to build REST gateway")?);
        let identity = Arc::new(IdentityResolver::new(store.clone()));
        let attribution = Arc::new(AttributionTracker::new(store.clone()));

        let analytics = AnalyticsDispatcher::new(
            gateway.clone(),
            identity.clone(),
            config.storage.namespace.clone(),
        )
        .with_attribution(attribution.clone())
        .with_enabled(config.analytics.enabled);

        Ok(Self {
            config,
            store,
            gateway,
            notifier,
            identity,
            attribution,
            analytics,
        })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    pub fn gateway(&self) -> Arc<RestGateway> {
        self.gateway.clone()
    }

    pub fn notifier(&self) -> Arc<dyn UserNotifier> {
        self.notifier.clone()
    }

    pub fn identity(&self) -> &IdentityResolver {
        &self.identity
    }

    pub fn attribution(&self) -> &AttributionTracker {
        &self.attribution
    }

    pub fn analytics(&self) -> &AnalyticsDispatcher {
        &self.analytics
    }

    /// Anonymous id of this installation under the configured namespace
    pub fn client_id(&self) -> ClientIdentity {
        self.identity
            .get_or_create_client_id(&self.config.storage.namespace)
    }

    pub fn manifest_source(&self) -> Result<HttpManifestSource> {
        HttpManifestSource::new(&self.config.backend)
    }

    /// Parse a tool id given on the command line
    pub fn subject(raw: &str) -> Result<SubjectId> {
        SubjectId::new(raw).with_context(|| format!("invalid tool id '{raw}'"))
    }
}
