use super::KeyValueStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of `store.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Timestamp of the last write
    saved_at: Option<String>,

    /// Key -> serialized value (JSON text or raw string)
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Durable store kept as a TOML file in the data directory.
///
/// Every entry lives in memory; each `set` updates the map first and then
/// rewrites the whole file, so a failed write still leaves the new value
/// visible for the rest of the session. After a failed write the next `set`
/// rewrites the file even if its value is unchanged.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// Memory holds entries the file does not
    dirty: bool,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file is missing.
    ///
    /// An unreadable or corrupt file is moved aside to `*.corrupt` and the
    /// store starts empty; widgets then fall back to their defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            tracing::debug!("No store file at {:?}, starting fresh", path);
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
                dirty: false,
            });
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store file: {:?}", path))?;

        let entries = match toml::from_str::<StoreFile>(&content) {
            Ok(file) => {
                tracing::info!(
                    "Store loaded from {:?} ({} entries, saved {})",
                    path,
                    file.entries.len(),
                    file.saved_at.as_deref().unwrap_or("never")
                );
                file.entries
            }
            Err(e) => {
                let aside = path.with_extension("toml.corrupt");
                tracing::warn!(
                    "Store file {:?} is corrupt ({}), moving it to {:?}",
                    path,
                    e,
                    aside
                );
                if let Err(e) = fs::rename(&path, &aside) {
                    tracing::warn!("Failed to move corrupt store aside: {}", e);
                }
                BTreeMap::new()
            }
        };

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Read the entries on disk without taking ownership of the file.
    ///
    /// A missing file reads as empty. A corrupt file is an error and stays
    /// where it is.
    pub fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read store file: {:?}", path))?;
        let file: StoreFile = toml::from_str(&content)
            .with_context(|| format!("Store file {:?} is corrupt", path))?;
        Ok(file.entries)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            saved_at: Some(chrono::Local::now().to_rfc3339()),
            entries: self.entries.clone(),
        };
        let toml_string = toml::to_string_pretty(&file).context("Failed to serialize store")?;
        fs::write(&self.path, toml_string)
            .with_context(|| format!("Failed to write store file: {:?}", self.path))?;

        tracing::debug!("Store saved to {:?}", self.path);
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        if !self.dirty && self.entries.get(key) == Some(&value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value);
        let result = self.write();
        self.dirty = result.is_err();
        result
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
