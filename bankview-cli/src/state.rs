use anyhow::{Context, Result};
use bankview_core::OverrideStore;
use std::fs;
use std::path::PathBuf;

/// `$BANKVIEW_HOME`, else `~/.bankview`.
pub fn bankview_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BANKVIEW_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".bankview"))
}

pub fn ensure_bankview_home() -> Result<PathBuf> {
    let dir = bankview_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn override_store() -> Result<OverrideStore> {
    Ok(OverrideStore::in_dir(&ensure_bankview_home()?))
}
