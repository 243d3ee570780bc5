//! In-memory asset registry, loadable from a JSON export of the host registry.
//!
//! ```json
//! {"assets": [{"path": "/Game/UI/WBP_Login", "class": "Widget Blueprint"}]}
//! ```

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::RwLock;

use super::{is_under, AssetAccessor, AssetRef};
use crate::error::AccessError;

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub path: String,
    pub class: String,
    #[serde(default = "default_loaded")]
    pub loaded: bool,
    /// Usage-specific classification (e.g. "Material used as an Instance"),
    /// only known once the asset is loaded.
    #[serde(default)]
    pub classification: Option<String>,
    /// Loading this asset fails with the given reason.
    #[serde(default)]
    pub load_error: Option<String>,
}

fn default_loaded() -> bool {
    true
}

#[derive(Deserialize)]
struct CatalogFile {
    assets: Vec<CatalogEntry>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    /// Path to position in `entries`.
    index: HashMap<String, usize>,
    roots: Vec<String>,
    loaded: RwLock<HashSet<String>>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let mut index = HashMap::with_capacity(entries.len());
        let mut roots: Vec<String> = Vec::new();
        let mut loaded = HashSet::new();

        for (i, entry) in entries.iter().enumerate() {
            index.entry(entry.path.clone()).or_insert(i);
            if entry.loaded {
                loaded.insert(entry.path.clone());
            }
            if let Some(segment) = entry.path.split('/').nth(1).filter(|s| !s.is_empty()) {
                let root = format!("/{segment}");
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
        }

        Self {
            entries,
            index,
            roots,
            loaded: RwLock::new(loaded),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, AccessError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.assets))
    }

    pub fn load_file(path: &Path) -> Result<Self, AccessError> {
        let content = std::fs::read_to_string(path).map_err(|source| AccessError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Shorthand for tests and embedding: loaded assets of the given classes.
    pub fn from_assets<'a>(assets: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self::new(
            assets
                .into_iter()
                .map(|(path, class)| CatalogEntry {
                    path: path.to_string(),
                    class: class.to_string(),
                    loaded: true,
                    classification: None,
                    load_error: None,
                })
                .collect(),
        )
    }

    fn entry(&self, path: &str) -> Option<&CatalogEntry> {
        self.index.get(path).map(|&i| &self.entries[i])
    }
}

impl AssetAccessor for Catalog {
    fn list_assets(&self, prefix: &str, recursive: bool) -> Result<Vec<AssetRef>, AccessError> {
        if let Some(entry) = self.entry(prefix) {
            return Ok(vec![AssetRef::new(&entry.path, &entry.class)]);
        }

        let mut found_namespace = false;
        let mut assets = Vec::new();
        for entry in &self.entries {
            if !is_under(&entry.path, prefix) {
                continue;
            }
            found_namespace = true;
            let asset = AssetRef::new(&entry.path, &entry.class);
            if recursive || asset.parent() == prefix {
                assets.push(asset);
            }
        }

        if !found_namespace {
            return Err(AccessError::UnknownPath(prefix.to_string()));
        }
        Ok(assets)
    }

    fn classify(&self, asset: &AssetRef) -> String {
        self.entry(&asset.path)
            .and_then(|e| e.classification.clone())
            .unwrap_or_else(|| asset.class.clone())
    }

    fn is_loaded(&self, asset: &AssetRef) -> bool {
        self.loaded
            .read()
            .map(|set| set.contains(&asset.path))
            .unwrap_or(false)
    }

    fn load(&self, asset: &AssetRef) -> Result<(), AccessError> {
        let entry = self
            .entry(&asset.path)
            .ok_or_else(|| AccessError::UnknownPath(asset.path.clone()))?;
        if let Some(reason) = &entry.load_error {
            return Err(AccessError::Load {
                path: asset.path.clone(),
                reason: reason.clone(),
            });
        }
        if let Ok(mut set) = self.loaded.write() {
            set.insert(asset.path.clone());
        }
        Ok(())
    }

    fn roots(&self) -> Vec<String> {
        self.roots.clone()
    }
}
