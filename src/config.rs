use anyhow::{Context, Result};
use compactor_rules::RuleRecord;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub const DEFAULT_CONFIG_PATH: &str = "config/compactor.toml";

/// Persisted compactor configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompactorConfig {
    /// Conversion rules in table order. A missing key reads as no rules.
    #[serde(default)]
    pub materials: Vec<RuleRecord>,
}

impl Default for CompactorConfig {
    fn default() -> Self {
        let rule = |source: &str, count: i64, target: &str| RuleRecord::new(source, count, target);
        Self {
            materials: vec![
                rule("coal", 9, "coal_block"),
                rule("iron_nugget", 9, "iron_ingot"),
                rule("iron_ingot", 9, "iron_block"),
                rule("gold_nugget", 9, "gold_ingot"),
                rule("gold_ingot", 9, "gold_block"),
                rule("copper_ingot", 9, "copper_block"),
                rule("diamond", 9, "diamond_block"),
                rule("emerald", 9, "emerald_block"),
                rule("lapis_lazuli", 9, "lapis_block"),
                rule("redstone", 9, "redstone_block"),
                rule("raw_iron", 9, "raw_iron_block"),
                rule("raw_gold", 9, "raw_gold_block"),
                rule("raw_copper", 9, "raw_copper_block"),
            ],
        }
    }
}

/// Reads and writes [`CompactorConfig`] as TOML.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration, failing on IO or parse errors.
    pub fn load(&self) -> Result<CompactorConfig> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", self.path.display()))
    }

    /// Load the configuration, writing the defaults first when the file is missing.
    pub fn load_or_init(&self) -> Result<CompactorConfig> {
        if !self.path.exists() {
            info!(
                "Compactor config not found at {}. Writing defaults",
                self.path.display()
            );
            let defaults = CompactorConfig::default();
            self.save(&defaults)?;
            return Ok(defaults);
        }
        self.load()
    }

    /// Save the configuration, creating parent directories as needed.
    pub fn save(&self, config: &CompactorConfig) -> Result<()> {
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Load for startup: any failure falls back to an empty rule list.
    pub fn load_lenient(&self) -> CompactorConfig {
        match self.load_or_init() {
            Ok(config) => config,
            Err(err) => {
                warn!("{err:#}. Starting with no compaction rules");
                CompactorConfig { materials: Vec::new() }
            }
        }
    }
}
