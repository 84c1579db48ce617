use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::AssetError;

/// Named text resources (maps, manifest, config).
///
/// In the browser the host pushes each file in by name; natively the store
/// can be filled from an asset directory. Names use `/` separators relative
/// to the asset root, e.g. `maps/map1.json`.
#[derive(Debug, Default, Clone)]
pub struct AssetStore {
    resources: HashMap<String, String>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(name.into(), text.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(name)
    }

    /// Fetch a resource by name.
    pub fn read(&self, name: &str) -> Result<&str, AssetError> {
        self.resources
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Load every `.json` file below `root`.
    pub fn from_dir(root: &Path) -> Result<Self, AssetError> {
        let mut store = Self::new();
        store.load_dir(root, root)?;
        log::info!("Loaded {} asset(s) from {}", store.len(), root.display());
        Ok(store)
    }

    fn load_dir(&mut self, root: &Path, dir: &Path) -> Result<(), AssetError> {
        let entries = fs::read_dir(dir).map_err(|source| io_error(dir, source))?;
        for entry in entries {
            let path = entry.map_err(|source| io_error(dir, source))?.path();
            if path.is_dir() {
                self.load_dir(root, &path)?;
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;
            self.insert(resource_name(root, &path), text);
        }
        Ok(())
    }
}

fn io_error(path: &Path, source: std::io::Error) -> AssetError {
    AssetError::Io {
        path: PathBuf::from(path),
        source,
    }
}

fn resource_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
