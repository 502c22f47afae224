//! Dynamic Manifest Swapper
//!
//! `Default` ⇄ `ToolScoped(toolId)`. Каждый переход заменяет единственный
//! manifest link в head (remove-then-insert). Если endpoint недоступен,
//! descriptor генерируется локально по той же схеме.

use crate::ports::{DocumentHead, ManifestLink, ManifestSource};
use domain::config::ManifestConfig;
use domain::{ManifestDescriptor, SubjectId, ToolProfile};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestScope {
    Default,
    ToolScoped(SubjectId),
}

/// Navigation signals that drive the swapper
#[derive(Debug, Clone)]
pub enum NavigationEvent {
    EnterTool(ToolProfile),
    Leave,
    Hidden,
    Unload,
}

/// Where the installed descriptor came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestOrigin {
    Static,
    Remote,
    Generated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledManifest {
    pub scope: ManifestScope,
    pub origin: ManifestOrigin,
    pub link: ManifestLink,
}

struct SwapState {
    scope: ManifestScope,
    /// Bumped on every transition so stale fetches never install
    generation: u64,
}

pub struct ManifestSwapper {
    head: Arc<dyn DocumentHead>,
    source: Arc<dyn ManifestSource>,
    config: ManifestConfig,
    state: Mutex<SwapState>,
}

impl ManifestSwapper {
    pub fn new(
        head: Arc<dyn DocumentHead>,
        source: Arc<dyn ManifestSource>,
        config: ManifestConfig,
    ) -> Self {
        Self {
            head,
            source,
            config,
            state: Mutex::new(SwapState {
                scope: ManifestScope::Default,
                generation: 0,
            }),
        }
    }

    pub fn scope(&self) -> ManifestScope {
        self.state.lock().scope.clone()
    }

    /// Dispatch a navigation event; returns what got installed, if anything
    pub async fn handle(&self, event: NavigationEvent) -> Option<InstalledManifest> {
        match event {
            NavigationEvent::EnterTool(tool) => self.enter_tool(&tool).await,
            NavigationEvent::Leave | NavigationEvent::Hidden | NavigationEvent::Unload => {
                self.reset()
            }
        }
    }

    /// Scope the manifest to `tool`. Re-entering the current tool is a no-op.
    #[instrument(skip(self, tool), fields(tool = %tool.id))]
    pub async fn enter_tool(&self, tool: &ToolProfile) -> Option<InstalledManifest> {
        let generation = {
            let mut state = self.state.lock();
            if state.scope == ManifestScope::ToolScoped(tool.id.clone()) {
                debug!("manifest already scoped to tool");
                return None;
            }
            state.generation += 1;
            state.generation
        };

        let (descriptor, origin) = match self.source.fetch_manifest(&tool.id).await {
            Ok(descriptor) => (descriptor, ManifestOrigin::Remote),
            Err(e) => {
                warn!(error = %e, "manifest endpoint failed, generating locally");
                (
                    ManifestDescriptor::for_tool(tool, &self.config.theme),
                    ManifestOrigin::Generated,
                )
            }
        };

        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("navigation changed while fetching manifest, discarding");
            return None;
        }

        let scope = ManifestScope::ToolScoped(tool.id.clone());
        let link = self.descriptor_link(descriptor);
        self.install(link.clone());
        state.scope = scope.clone();

        info!(?origin, "tool-scoped manifest installed");
        Some(InstalledManifest {
            scope,
            origin,
            link,
        })
    }

    /// Restore the site-wide manifest. No-op when already `Default`.
    pub fn reset(&self) -> Option<InstalledManifest> {
        let mut state = self.state.lock();
        // A pending enter_tool must not install after a reset
        state.generation += 1;
        if state.scope == ManifestScope::Default {
            return None;
        }

        let link = ManifestLink {
            href: self.config.default_href.clone(),
            descriptor: None,
        };
        self.install(link.clone());
        state.scope = ManifestScope::Default;

        info!("default manifest restored");
        Some(InstalledManifest {
            scope: ManifestScope::Default,
            origin: ManifestOrigin::Static,
            link,
        })
    }

    fn install(&self, link: ManifestLink) {
        let removed = self.head.remove_manifest_links();
        debug!(removed, href_len = link.href.len(), "replacing manifest link");
        self.head.insert_manifest_link(link);
    }

    /// Inline the descriptor as a data URL so no extra request is needed
    fn descriptor_link(&self, descriptor: ManifestDescriptor) -> ManifestLink {
        match serde_json::to_string(&descriptor) {
            Ok(json) => ManifestLink {
                href: format!(
                    "data:application/manifest+json,{}",
                    urlencoding::encode(&json)
                ),
                descriptor: Some(descriptor),
            },
            Err(e) => {
                warn!(error = %e, "manifest serialization failed, keeping default href");
                ManifestLink {
                    href: self.config.default_href.clone(),
                    descriptor: Some(descriptor),
                }
            }
        }
    }
}
