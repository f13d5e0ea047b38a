// File: src/config.rs
// Purpose: Route tree configuration parsed from TOML

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Options applied while composing a route tree
///
/// ```toml
/// strict_templates = true
/// base_path = "/app"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutesConfig {
    /// Reject malformed templates and unknown path codec keys (default: true)
    #[serde(default = "default_true")]
    pub strict_templates: bool,

    /// Mount point placed before absolute paths, e.g. "/app"
    #[serde(default)]
    pub base_path: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            strict_templates: true,
            base_path: None,
        }
    }
}

impl RoutesConfig {
    /// Parses a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse routes configuration")
    }

    /// Loads a configuration file, falling back to defaults when it is absent
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!(path = %path.display(), "routes config not found, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn with_strict_templates(mut self, strict: bool) -> Self {
        self.strict_templates = strict;
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// The normalized mount prefix: `/segment…` without a trailing slash, or
    /// empty when unset or root
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_routes::RoutesConfig;
    ///
    /// let config = RoutesConfig::default().with_base_path("app//v1/");
    /// assert_eq!(config.mount_prefix(), "/app/v1");
    /// assert_eq!(RoutesConfig::default().mount_prefix(), "");
    /// ```
    pub fn mount_prefix(&self) -> String {
        let Some(base) = self.base_path.as_deref() else {
            return String::new();
        };

        base.replace('\\', "/")
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(String::new(), |mut prefix, segment| {
                prefix.push('/');
                prefix.push_str(segment);
                prefix
            })
    }
}
