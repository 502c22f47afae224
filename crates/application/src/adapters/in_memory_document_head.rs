use crate::ports::{DocumentHead, ManifestLink};
use parking_lot::Mutex;

/// Stand-in for `document.head` that only tracks manifest links
#[derive(Debug, Default)]
pub struct InMemoryDocumentHead {
    links: Mutex<Vec<ManifestLink>>,
    insertions: Mutex<usize>,
}

impl InMemoryDocumentHead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the head with an existing link, as server-rendered HTML would
    pub fn with_link(href: &str) -> Self {
        let head = Self::new();
        head.links.lock().push(ManifestLink {
            href: href.to_string(),
            descriptor: None,
        });
        head
    }

    /// Total number of links ever inserted
    pub fn insertions(&self) -> usize {
        *self.insertions.lock()
    }
}

impl DocumentHead for InMemoryDocumentHead {
    fn remove_manifest_links(&self) -> usize {
        let mut links = self.links.lock();
        let removed = links.len();
        links.clear();
        removed
    }

    fn insert_manifest_link(&self, link: ManifestLink) {
        self.links.lock().push(link);
        *self.insertions.lock() += 1;
    }

    fn manifest_links(&self) -> Vec<ManifestLink> {
        self.links.lock().clone()
    }
}
