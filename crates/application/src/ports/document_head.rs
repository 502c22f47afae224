//! Document Head Port
//!
//! Абстракция над `<head>`: только manifest `<link>` элементы.

use domain::ManifestDescriptor;

/// A manifest `<link rel="manifest">` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLink {
    pub href: String,
    /// Inline descriptor when `href` is a generated data URL
    pub descriptor: Option<ManifestDescriptor>,
}

pub trait DocumentHead: Send + Sync {
    /// Remove every manifest link, returning how many were removed
    fn remove_manifest_links(&self) -> usize;

    fn insert_manifest_link(&self, link: ManifestLink);

    fn manifest_links(&self) -> Vec<ManifestLink>;
}
