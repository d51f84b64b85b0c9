//! CLI execution context.

use std::path::PathBuf;

use anyhow::{Context as _, Result};

use stone_observability::{LogFormat, LogLevel, StructuredLogger};
use stone_store::{Dataset, Direction, MemoryStore, OrderBy};

use crate::config::CliConfig;
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &PathBuf) -> Option<CliConfig> {
        let config_names = ["stonecraft.toml", ".stonecraft.toml", "stonecraft.json"];

        let mut current = start.clone();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolved path of the JSON store file.
    pub fn store_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.config.store_path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }

    /// Product ordering from config. Reads always run newest first.
    pub fn order(&self) -> OrderBy {
        OrderBy::new(self.config.order_by, Direction::Descending)
    }

    /// Logger configured from the config file and verbosity flag.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        let format = LogFormat::parse(&self.config.log_format).unwrap_or_default();
        let mut logger = StructuredLogger::new(component).with_format(format);
        if self.output.is_verbose() {
            logger = logger.with_min_level(LogLevel::Debug);
        }
        logger
    }

    /// Open the store file, or an empty store when none exists yet.
    pub fn open_store(&self) -> Result<MemoryStore> {
        let path = self.store_path();
        if !path.exists() {
            self.output
                .debug(&format!("no store file at {}, starting empty", path.display()));
            return Ok(MemoryStore::new());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {}", path.display()))?;
        let dataset: Dataset = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse store file: {}", path.display()))?;
        Ok(MemoryStore::from_dataset(dataset))
    }

    /// Write the store back to its file.
    pub fn save_store(&self, store: &MemoryStore) -> Result<()> {
        let path = self.store_path();
        let json = serde_json::to_string_pretty(&store.export())?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write store file: {}", path.display()))?;
        self.output
            .debug(&format!("store written to {}", path.display()));
        Ok(())
    }
}
