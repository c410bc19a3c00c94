//! Local category overrides: transaction id -> category, kept in a JSON file.
//!
//! Persistence is best effort. A missing or corrupt file reads as "no
//! overrides" and write failures are logged, never returned.

use crate::transaction::{Transaction, normalize_category_name};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name of the override map inside the bankview home directory.
pub const OVERRIDES_FILE: &str = "bank_statement_categories.json";

pub type OverrideMap = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct OverrideStore {
    path: PathBuf,
}

impl OverrideStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/bank_statement_categories.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(OVERRIDES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the map, falling back to empty on any failure.
    pub fn load(&self) -> OverrideMap {
        if !self.path.exists() {
            return OverrideMap::new();
        }
        match self.try_load() {
            Ok(map) => map,
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %format!("{e:#}"),
                    "ignoring unreadable overrides"
                );
                OverrideMap::new()
            }
        }
    }

    fn try_load(&self) -> Result<OverrideMap> {
        let s = fs::read_to_string(&self.path)
            .with_context(|| format!("read {}", self.path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", self.path.display()))
    }

    /// Write the map; failures are logged and swallowed.
    pub fn save(&self, map: &OverrideMap) {
        if let Err(e) = self.try_save(map) {
            warn!(
                path = %self.path.display(),
                error = %format!("{e:#}"),
                "failed to save overrides"
            );
        }
    }

    fn try_save(&self, map: &OverrideMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(map).context("serialize overrides")?;
        fs::write(&self.path, json).with_context(|| format!("write {}", self.path.display()))?;
        debug!(path = %self.path.display(), entries = map.len(), "saved overrides");
        Ok(())
    }

    /// Load, set `id -> category`, save.
    pub fn record(&self, id: &str, category: &str) {
        let mut map = self.load();
        map.insert(id.to_string(), category.to_string());
        self.save(&map);
    }
}

/// Overwrite categories of transactions that have an override.
///
/// Server-provided categories lose. Stored values are trimmed; blank ones
/// are skipped. Returns how many transactions were touched.
pub fn merge(transactions: &mut [Transaction], map: &OverrideMap) -> usize {
    let mut applied = 0;
    for t in transactions.iter_mut() {
        let Some(cat) = map.get(&t.id).and_then(|c| normalize_category_name(c)) else {
            continue;
        };
        t.category = Some(cat);
        applied += 1;
    }
    applied
}
