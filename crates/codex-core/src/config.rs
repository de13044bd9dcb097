//! RON configuration for the codex engine
//!
//! Every field has a default, so an empty `()` file is a valid configuration.
//! Environment variables override file values (see [`CodexConfig::apply_env`]).

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CodexConfig {
    /// Public API address used to compose pagination links
    #[serde(default)]
    pub api: ApiConfig,
    /// Image URL composition
    #[serde(default)]
    pub images: ImageConfig,
    /// Page size limits
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// Public API address
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// URL scheme ("http" or "https")
    #[serde(default = "default_scheme")]
    pub scheme: String,
    /// Host name
    #[serde(default = "default_host")]
    pub host: String,
    /// Port, omitted from links when unset
    #[serde(default)]
    pub port: Option<u16>,
    /// Path prepended to `/{locale}/{kind}` in links
    #[serde(default)]
    pub path_prefix: String,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: None,
            path_prefix: String::new(),
        }
    }
}

/// Image URL composition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImageConfig {
    /// Base URL for all images
    #[serde(default = "default_image_base")]
    pub base_url: String,
    /// Resolution tiers available for item images (1-4)
    #[serde(default = "default_item_tiers")]
    pub item_tiers: u8,
    /// Resolution tiers available for mount images (1-4)
    #[serde(default = "default_mount_tiers")]
    pub mount_tiers: u8,
}

fn default_image_base() -> String {
    "http://localhost/img".to_string()
}

fn default_item_tiers() -> u8 {
    2
}

fn default_mount_tiers() -> u8 {
    4
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base(),
            item_tiers: default_item_tiers(),
            mount_tiers: default_mount_tiers(),
        }
    }
}

/// Page size limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    /// Largest page size a request may ask for
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,
}

fn default_max_page_size() -> u32 {
    32
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_page_size: default_max_page_size(),
        }
    }
}

impl CodexConfig {
    /// Load configuration from a RON file, apply environment overrides and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let mut config = Self::from_ron(&content)?;
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a RON string
    pub fn from_ron(content: &str) -> Result<Self> {
        Ok(ron::from_str(content)?)
    }

    /// Override fields from `API_SCHEME`, `API_HOSTNAME`, `API_PORT`,
    /// `IMAGE_BASE_URL` and `MAX_PAGE_SIZE`.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| std::env::var(key).ok());
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(scheme) = var("API_SCHEME") {
            self.api.scheme = scheme;
        }
        if let Some(host) = var("API_HOSTNAME") {
            self.api.host = host;
        }
        if let Some(port) = var("API_PORT") {
            match port.parse() {
                Ok(port) => self.api.port = Some(port),
                Err(_) => tracing::warn!(%port, "ignoring unparsable API_PORT"),
            }
        }
        if let Some(base) = var("IMAGE_BASE_URL") {
            self.images.base_url = base;
        }
        if let Some(size) = var("MAX_PAGE_SIZE") {
            match size.parse() {
                Ok(size) => self.pagination.max_page_size = size,
                Err(_) => tracing::warn!(%size, "ignoring unparsable MAX_PAGE_SIZE"),
            }
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.pagination.max_page_size == 0 {
            return Err(Error::ConfigValidation(
                "max_page_size must be at least 1".to_string(),
            ));
        }
        for (name, tiers) in [
            ("item_tiers", self.images.item_tiers),
            ("mount_tiers", self.images.mount_tiers),
        ] {
            if !(1..=4).contains(&tiers) {
                return Err(Error::ConfigValidation(format!(
                    "{} must be between 1 and 4, got {}",
                    name, tiers
                )));
            }
        }
        if self.api.host.is_empty() {
            return Err(Error::ConfigValidation("api host is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CodexConfig::from_ron("()").unwrap();
        assert_eq!(config.api.scheme, "http");
        assert_eq!(config.api.host, "localhost");
        assert_eq!(config.pagination.max_page_size, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config() {
        let config = CodexConfig::from_ron(
            r#"(
                api: (scheme: "https", host: "api.example.org"),
                pagination: (max_page_size: 50),
            )"#,
        )
        .unwrap();
        assert_eq!(config.api.scheme, "https");
        assert_eq!(config.api.port, None);
        assert_eq!(config.images.mount_tiers, 4);
        assert_eq!(config.pagination.max_page_size, 50);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("API_HOSTNAME", "codex.example.org"),
            ("API_PORT", "8080"),
            ("MAX_PAGE_SIZE", "not-a-number"),
        ]);
        let mut config = CodexConfig::default();
        config.apply_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.api.host, "codex.example.org");
        assert_eq!(config.api.port, Some(8080));
        assert_eq!(config.pagination.max_page_size, 32);
    }

    #[test]
    fn test_validation() {
        let mut config = CodexConfig::default();
        config.images.item_tiers = 5;
        assert!(matches!(config.validate(), Err(Error::ConfigValidation(_))));

        let mut config = CodexConfig::default();
        config.pagination.max_page_size = 0;
        assert!(matches!(config.validate(), Err(Error::ConfigValidation(_))));
    }
}
