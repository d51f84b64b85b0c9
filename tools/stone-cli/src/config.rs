//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use stone_store::OrderField;

/// CLI configuration file (`stonecraft.toml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Path of the JSON store file, relative to the working directory.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Which recency field orders product reads.
    ///
    /// `created_at` is what the admin path writes; `timestamp` matches
    /// legacy imports. Pick per store file rather than guessing.
    #[serde(default)]
    pub order_by: OrderField,

    /// Log output format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_store_path() -> String {
    "stonecraft-data.json".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            order_by: OrderField::default(),
            log_format: default_log_format(),
        }
    }
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}
