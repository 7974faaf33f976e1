use serde::{Deserialize, Serialize};

/// Generation mode used for every template this service creates
pub const DYNAMIC_GENERATION: &str = "dynamic";

/// Editor mode stamped on every uploaded version
pub const DESIGN_EDITOR: &str = "design";

/// Version name used when the caller does not supply one
pub const DEFAULT_VERSION_NAME: &str = "Default version";

/// Remote template as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub generation: Option<String>,
    #[serde(default)]
    pub versions: Vec<TemplateVersion>,
}

impl Template {
    /// Locate a version by its ID
    pub fn find_version(&self, version_id: &str) -> Option<&TemplateVersion> {
        self.versions.iter().find(|v| v.id == version_id)
    }
}

/// A single revision of a remote template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateVersion {
    pub id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub html_content: Option<String>,
    #[serde(default)]
    pub editor: Option<String>,
    #[serde(default)]
    pub active: u8,
}

/// Payload for `POST /templates`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTemplate {
    pub name: String,
    pub generation: String,
}

impl CreateTemplate {
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            generation: DYNAMIC_GENERATION.to_string(),
        }
    }
}

/// Payload for `POST /templates/{id}/versions`
#[derive(Debug, Clone, Serialize)]
pub struct CreateTemplateVersion {
    pub name: String,
    pub subject: String,
    pub html_content: String,
    pub editor: String,
}

impl CreateTemplateVersion {
    /// Build a version payload, filling the default name and an empty subject
    pub fn new(name: Option<&str>, subject: Option<&str>, html_content: impl Into<String>) -> Self {
        Self {
            name: name.unwrap_or(DEFAULT_VERSION_NAME).to_string(),
            subject: subject.unwrap_or_default().to_string(),
            html_content: html_content.into(),
            editor: DESIGN_EDITOR.to_string(),
        }
    }
}
