//! Desk configuration loaded from TOML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::*;

/// Top-level configuration; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub school: SchoolConfig,
    pub store: StoreConfig,
    pub export: ExportConfig,
    pub webhook: WebhookConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    pub name: String,
    pub address: String,
    pub contact: Option<String>,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        let profile = SchoolProfile::default();
        Self {
            name: profile.name,
            address: profile.address,
            contact: profile.contact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding the counter and the receipt archive
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("receipts.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Endpoint receipts are posted to; absent means not configured
    pub url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: 10,
        }
    }
}

impl WebhookConfig {
    /// Configured endpoint, ignoring blank values
    pub fn endpoint(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl DeskConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> ReceiptResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ReceiptError::Config(format!("reading {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> ReceiptResult<Self> {
        let config: DeskConfig = toml::from_str(content)
            .map_err(|e| ReceiptError::Config(format!("parsing TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> ReceiptResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ReceiptResult<()> {
        if self.school.name.trim().is_empty() {
            return Err(ReceiptError::Config(
                "school.name cannot be empty".to_string(),
            ));
        }

        if let Some(url) = self.webhook.endpoint() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ReceiptError::Config(format!(
                    "webhook.url must be an http(s) URL, got '{}'",
                    url
                )));
            }
        }

        if self.webhook.timeout_seconds == 0 {
            return Err(ReceiptError::Config(
                "webhook.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// School profile printed on receipts
    pub fn school_profile(&self) -> SchoolProfile {
        SchoolProfile {
            name: self.school.name.clone(),
            address: self.school.address.clone(),
            contact: self.school.contact.clone(),
        }
    }
}
