//! Geometry persistence keyed by window class.
//!
//! The backing store is a plain text key-value map, the same shape a browser's
//! local storage offers. Each class id gets one key, `win-pos-<class>`, whose
//! value is a JSON object with exactly `left`, `top`, `width` and `height`.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::GEOMETRY_KEY_PREFIX;
use crate::error::StorageError;
use crate::geometry::Geometry;

/// Text key-value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// A JSON file holding a flat `{ key: text }` object. The whole file is
/// rewritten on every change; geometry is only saved at gesture end so the
/// volume stays small.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`. A missing file is an
    /// empty store; an unreadable or malformed one is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), entries = entries.len(), "opened geometry store");
        Ok(Self { path, entries })
    }

    /// Platform data directory location, e.g. `~/.local/share/desk-wm/geometry.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("geometry.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Lenient read shape: older writers stored fractional pixel values.
#[derive(Debug, Deserialize)]
struct StoredBounds {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

/// Typed geometry access on top of a [`KeyValueStore`].
pub struct GeometryStore {
    backend: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for GeometryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryStore").finish_non_exhaustive()
    }
}

impl GeometryStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn key_for(class_id: &str) -> String {
        format!("{GEOMETRY_KEY_PREFIX}{class_id}")
    }

    /// Raw stored text for `class_id`.
    pub fn raw(&self, class_id: &str) -> Result<Option<String>, StorageError> {
        self.backend.get(&Self::key_for(class_id))
    }

    pub fn load(&self, class_id: &str) -> Result<Option<Geometry>, StorageError> {
        let key = Self::key_for(class_id);
        let Some(raw) = self.backend.get(&key)? else {
            return Ok(None);
        };
        let stored: StoredBounds =
            serde_json::from_str(&raw).map_err(|err| StorageError::Corrupt {
                key: key.clone(),
                reason: err.to_string(),
            })?;
        to_geometry(&key, &stored).map(Some)
    }

    pub fn save(&mut self, class_id: &str, geometry: Geometry) -> Result<(), StorageError> {
        let value = serde_json::to_string(&geometry)?;
        self.backend.set(&Self::key_for(class_id), value)
    }

    pub fn forget(&mut self, class_id: &str) -> Result<(), StorageError> {
        self.backend.remove(&Self::key_for(class_id))
    }
}

fn to_geometry(key: &str, stored: &StoredBounds) -> Result<Geometry, StorageError> {
    let fields = [stored.left, stored.top, stored.width, stored.height];
    if fields
        .iter()
        .any(|v| !v.is_finite() || v.abs() > f64::from(i32::MAX))
    {
        return Err(StorageError::Corrupt {
            key: key.to_string(),
            reason: "non-finite or out of range value".to_string(),
        });
    }
    if stored.width < 0.0 || stored.height < 0.0 {
        return Err(StorageError::Corrupt {
            key: key.to_string(),
            reason: "negative size".to_string(),
        });
    }
    Ok(Geometry {
        left: stored.left.round() as i32,
        top: stored.top.round() as i32,
        width: stored.width.round() as i32,
        height: stored.height.round() as i32,
    })
}
