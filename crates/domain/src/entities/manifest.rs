//! Web App Manifest descriptor
//!
//! Схема совпадает с ответом `GET /manifest/{toolId}`, поэтому локально
//! сгенерированный descriptor взаимозаменяем с серверным.

use crate::value_objects::{ManifestTheme, SubjectId};
use serde::{Deserialize, Serialize};

/// Minimal tool information needed to scope a manifest to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolProfile {
    pub id: SubjectId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl ToolProfile {
    pub fn new(id: SubjectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            logo_url: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_logo(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDescriptor {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub scope: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
}

impl ManifestDescriptor {
    /// Short names longer than this get truncated on home screens
    pub const SHORT_NAME_MAX: usize = 12;

    /// Generate a tool-scoped descriptor without a network round trip
    pub fn for_tool(tool: &ToolProfile, theme: &ManifestTheme) -> Self {
        let id = tool.id.as_str();
        let name = if tool.name.trim().is_empty() {
            id.to_string()
        } else {
            tool.name.trim().to_string()
        };

        let description = tool
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{name} on the AI tool directory"));

        Self {
            short_name: name.chars().take(Self::SHORT_NAME_MAX).collect(),
            name,
            description,
            start_url: format!("/tools/{id}?source=pwa"),
            scope: format!("/tools/{id}"),
            display: "standalone".to_string(),
            background_color: theme.background_color.clone(),
            theme_color: theme.theme_color.clone(),
            icons: Self::tool_icons(tool.logo_url.as_deref()),
        }
    }

    fn tool_icons(logo_url: Option<&str>) -> Vec<ManifestIcon> {
        ["192x192", "512x512"]
            .into_iter()
            .map(|sizes| {
                let (src, purpose) = match logo_url {
                    Some(logo) => (logo.to_string(), "any"),
                    None => (
                        format!("/icons/icon-{}.png", &sizes[..3]),
                        "any maskable",
                    ),
                };
                ManifestIcon {
                    src,
                    sizes: sizes.to_string(),
                    mime_type: "image/png".to_string(),
                    purpose: Some(purpose.to_string()),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_descriptor_is_scoped_to_tool() {
        let tool = ToolProfile::new(SubjectId::new("tool-123").unwrap(), "Stable Diffusion XL");
        let descriptor = ManifestDescriptor::for_tool(&tool, &ManifestTheme::default());

        assert!(descriptor.start_url.contains("tool-123"));
        assert_eq!(descriptor.scope, "/tools/tool-123");
        assert_eq!(descriptor.short_name, "Stable Diffu");
        assert_eq!(descriptor.display, "standalone");
        assert_eq!(descriptor.icons.len(), 2);
        assert_eq!(descriptor.icons[0].src, "/icons/icon-192.png");
    }

    #[test]
    fn test_descriptor_uses_logo_and_serializes_type_field() {
        let tool = ToolProfile::new(SubjectId::new("t1").unwrap(), "Tool")
            .with_logo("https://cdn.example.com/t1.png")
            .with_description("Writes code");
        let descriptor = ManifestDescriptor::for_tool(&tool, &ManifestTheme::default());

        assert_eq!(descriptor.description, "Writes code");
        assert!(descriptor.icons.iter().all(|i| i.src.ends_with("t1.png")));

        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["icons"][0]["type"], "image/png");
    }
}
