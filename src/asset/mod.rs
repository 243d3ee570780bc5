pub mod catalog;
pub mod fs;

use serde::{Deserialize, Serialize};

use crate::error::{AccessError, ScanError};

pub use catalog::Catalog;
pub use fs::FsAccessor;

/// A caller-supplied asset path or namespace prefix. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn new(path: impl Into<String>) -> Result<Self, ScanError> {
        let path = path.into();
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ScanError::InvalidPath);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to one resolved asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Canonical path, e.g. `/Game/UI/Widgets/WBP_Login`. Unique key.
    pub path: String,
    /// Declared type, e.g. `Widget Blueprint`.
    pub class: String,
}

impl AssetRef {
    pub fn new(path: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            class: class.into(),
        }
    }

    /// Logical name: the last path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    /// Namespace the asset lives in, without a trailing slash.
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('/').map_or("", |(parent, _)| parent)
    }
}

/// Read-only view of the host asset registry.
///
/// Implementations must be safe to share across evaluation workers.
pub trait AssetAccessor: Send + Sync {
    /// Resolve a path to assets. A path naming one asset yields that asset;
    /// a namespace yields its children, or all descendants when `recursive`.
    fn list_assets(&self, prefix: &str, recursive: bool) -> Result<Vec<AssetRef>, AccessError>;

    /// Classification key used for naming-convention lookup.
    fn classify(&self, asset: &AssetRef) -> String {
        asset.class.clone()
    }

    fn is_loaded(&self, asset: &AssetRef) -> bool;

    fn load(&self, asset: &AssetRef) -> Result<(), AccessError>;

    /// Namespace roots, e.g. `["/Game"]`.
    fn roots(&self) -> Vec<String>;
}

/// `path` equals `prefix` or is nested under it.
pub(crate) fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
