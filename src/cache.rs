//! File-backed stand-in for the browser's per-session local storage.
use crate::error::{SkResult, SkinstricError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub mod keys {
    pub const NAME: &str = "skinstric_name";
    pub const LOCATION: &str = "skinstric_location";
    pub const PHASE_TWO_RESPONSE: &str = "skinstric_phase_two_response";
    pub const UPLOADED_FILE_NAME: &str = "skinstric_uploaded_file_name";
    pub const CAPTURED_PHOTO_PREVIEW: &str = "skinstric_captured_photo_preview";
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionCache {
    #[serde(skip)]
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl SessionCache {
    /// In-memory cache with no backing file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens the cache file; a missing or unparsable file is an empty cache.
    pub fn open<P: AsRef<Path>>(path: P) -> SkResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("Cache '{}' not found; starting empty", path.display());
            return Ok(Self::empty_at(path));
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::empty_at(path));
        }
        match serde_json::from_str::<SessionCache>(&content) {
            Ok(mut cache) => {
                cache.path = Some(path.to_path_buf());
                Ok(cache)
            }
            Err(e) => {
                warn!("Cache '{}' is not valid JSON ({}); starting empty", path.display(), e);
                Ok(Self::empty_at(path))
            }
        }
    }

    fn empty_at(path: &Path) -> Self {
        Self {
            path: Some(path.to_path_buf()),
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like [`get`](Self::get) but a missing entry is a [`SkinstricError::CacheMiss`].
    pub fn require(&self, key: &str) -> SkResult<&str> {
        self.get(key)
            .ok_or_else(|| SkinstricError::CacheMiss(key.to_string()))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Writes the cache back to its file. In-memory caches are a no-op.
    pub fn save(&self) -> SkResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved {} cache entries to '{}'", self.entries.len(), path.display());
        Ok(())
    }
}
