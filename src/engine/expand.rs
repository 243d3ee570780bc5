use std::collections::HashSet;

use crate::asset::{AssetAccessor, AssetPath, AssetRef};
use crate::error::ScanError;

/// Expand input paths into a flat asset list, deduplicated by canonical
/// path in first-seen order. Any unresolvable path fails the whole expansion.
pub fn expand(
    accessor: &dyn AssetAccessor,
    paths: &[AssetPath],
) -> Result<Vec<AssetRef>, ScanError> {
    let mut seen = HashSet::new();
    let mut assets = Vec::new();

    for path in paths {
        let found = accessor
            .list_assets(path.as_str(), true)
            .map_err(|source| ScanError::Expansion {
                path: path.to_string(),
                source,
            })?;
        tracing::debug!(path = %path, assets = found.len(), "expanded path");

        for asset in found {
            if seen.insert(asset.path.clone()) {
                assets.push(asset);
            }
        }
    }

    Ok(assets)
}
