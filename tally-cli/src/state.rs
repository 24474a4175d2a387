use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub fn tally_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".tally"))
}

pub fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("config.toml"))
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(tally_home()?.join("transactions.jsonl"))
}

pub fn read_statement(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}
