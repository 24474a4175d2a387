use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tally_core::DEFAULT_TIMEZONE;
use tally_finance::{CategoryRule, CategoryRules, DEFAULT_FALLBACK};

use crate::output::OutputFormat;
use crate::state;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ingest: IngestSection,
    pub store: StoreSection,
    pub log: LogSection,
    pub preview: PreviewSection,
    /// Replaces the built-in category table when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<CategoriesSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSection {
    /// IANA zone used for the ingestion date of undated rows
    pub timezone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// JSON-lines file; defaults to ~/.tally/transactions.jsonl
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSection {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesSection {
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default)]
    pub rules: Vec<CategoryRule>,
}

fn default_fallback() -> String {
    DEFAULT_FALLBACK.to_string()
}

impl Default for IngestSection {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    pub fn category_rules(&self) -> CategoryRules {
        match &self.categories {
            Some(c) => CategoryRules::new(c.rules.clone(), c.fallback.clone()),
            None => CategoryRules::default(),
        }
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(p) => Ok(p.clone()),
            None => state::default_store_path(),
        }
    }
}

pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => state::default_config_path(),
    }
}

/// Missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, cfg: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        state::ensure_dir(dir)?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        println!("Config already exists: {}", path.display());
        return Ok(());
    }
    save_config(path, &Config::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}
