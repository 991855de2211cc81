use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Runtime configuration for the studio server, loaded from a YAML file.
/// Every field has a default so a missing or partial file still yields a
/// usable configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudioConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory mockup blobs are written to.
    #[serde(default = "default_storage_root")]
    pub root: String,
    /// Base URL public mockup URLs are derived from. Must match where the
    /// storage root is served.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Endpoint of the external SEO workflow. Both the analysis and the
    /// content-writing operations POST to this single URL.
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,
}

fn default_port() -> u16 {
    3000
}

fn default_database() -> String {
    "motif.db".to_string()
}

fn default_storage_root() -> String {
    "mockups".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:3000/mockups".to_string()
}

fn default_webhook_url() -> String {
    "http://localhost:5678/webhook/seo-analysis".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_storage_root(),
            public_base_url: default_public_base_url(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            webhook_url: default_webhook_url(),
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database: default_database(),
            storage: StorageConfig::default(),
            workflow: WorkflowConfig::default(),
        }
    }
}

impl StudioConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
