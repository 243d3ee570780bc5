use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::catalog::{Catalog, CatalogEntry};
use super::{AssetAccessor, AssetRef};
use crate::error::AccessError;

/// Asset registry backed by a content directory mounted under a namespace
/// root: `Content/UI/WBP_Login.uasset` becomes `/Game/UI/WBP_Login`.
#[derive(Debug)]
pub struct FsAccessor {
    mount: String,
    catalog: Catalog,
}

impl FsAccessor {
    pub fn open(
        content_root: &Path,
        mount: &str,
        classes: &HashMap<String, String>,
        ignore: &[String],
    ) -> Result<Self, AccessError> {
        if !content_root.is_dir() {
            return Err(AccessError::Io {
                path: content_root.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "content root is not a directory",
                ),
            });
        }

        let ignore_set = build_glob_set(ignore);
        let mut files = Vec::new();
        walk_dir(content_root, content_root, &ignore_set, &mut files);
        files.sort();

        let mount = mount.trim_end_matches('/').to_string();
        let entries = files
            .iter()
            .filter_map(|file| {
                let rel = file.strip_prefix(content_root).ok()?;
                let stem = rel.with_extension("");
                let Some(segments) = stem
                    .components()
                    .map(|c| c.as_os_str().to_str())
                    .collect::<Option<Vec<_>>>()
                else {
                    tracing::warn!(file = %file.display(), "skipping file with non UTF-8 path");
                    return None;
                };
                let ext = file
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or_default()
                    .to_lowercase();
                let class = classes.get(&ext).cloned().unwrap_or(ext);
                Some(CatalogEntry {
                    path: format!("{mount}/{}", segments.join("/")),
                    class,
                    loaded: true,
                    classification: None,
                    load_error: None,
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            root = %content_root.display(),
            assets = entries.len(),
            "indexed content directory"
        );

        Ok(Self {
            mount,
            catalog: Catalog::new(entries),
        })
    }
}

impl AssetAccessor for FsAccessor {
    fn list_assets(&self, prefix: &str, recursive: bool) -> Result<Vec<AssetRef>, AccessError> {
        match self.catalog.list_assets(prefix, recursive) {
            // An empty mounted directory is a known namespace.
            Err(AccessError::UnknownPath(_)) if prefix == self.mount => Ok(Vec::new()),
            other => other,
        }
    }

    fn is_loaded(&self, _asset: &AssetRef) -> bool {
        true
    }

    fn load(&self, _asset: &AssetRef) -> Result<(), AccessError> {
        Ok(())
    }

    fn roots(&self) -> Vec<String> {
        vec![self.mount.clone()]
    }
}

pub(crate) fn build_glob_set(patterns: &[String]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    patterns
        .iter()
        .filter_map(|p| GlobBuilder::new(p).case_insensitive(true).build().ok())
        .for_each(|glob| {
            builder.add(glob);
        });
    builder.build().unwrap_or_default()
}

fn matches_glob(path: &Path, root: &Path, set: &GlobSet) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| set.is_match(name))
        || path.strip_prefix(root).is_ok_and(|rel| set.is_match(rel))
}

fn walk_dir(dir: &Path, root: &Path, ignore: &GlobSet, files: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if matches_glob(&path, root, ignore) {
            continue;
        }

        if path.is_dir() {
            walk_dir(&path, root, ignore, files);
        } else if path.extension().is_some() {
            files.push(path);
        }
    }
}
