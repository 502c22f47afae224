use serde::{Deserialize, Serialize};

/// Colors applied to locally generated web app manifests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestTheme {
    pub theme_color: String,
    pub background_color: String,
}

impl Default for ManifestTheme {
    fn default() -> Self {
        Self {
            theme_color: "#6366f1".to_string(),
            background_color: "#0f172a".to_string(),
        }
    }
}
