use std::path::Path;

use bevy_tmxmap_core::Properties;
use normalize_path::NormalizePath;

pub mod map;
pub mod tileset;

/// Resolve a path written inside a Tiled document to a Bevy asset path
///
/// Tiled stores references relative to the referring file (e.g. `../tilesets/dungeon.tsx`),
/// while Bevy's `AssetServer` expects asset-root-relative paths and rejects `..` components.
///
/// This function:
/// 1. Normalizes separators to forward slashes
/// 2. Joins the relative path onto the parent directory of `asset_path`
/// 3. Resolves `.` and `..` components
///
/// Errors carry a human-readable reason, wrapped by each loader's `InvalidPath` variant.
pub(crate) fn resolve_relative_path(asset_path: &Path, relative_path: &str) -> Result<String, String> {
    let relative_path = relative_path.replace('\\', "/");

    let parent = asset_path
        .parent()
        .ok_or_else(|| format!("No parent directory for asset: {:?}", asset_path))?;
    let parent_str = parent
        .to_str()
        .ok_or_else(|| format!("Invalid UTF-8 in path: {:?}", parent))?
        .replace('\\', "/");

    // Join with forward slash (avoid Path::join which has platform-specific behavior)
    let full_path = if parent_str.is_empty() {
        relative_path
    } else {
        format!("{}/{}", parent_str, relative_path)
    };

    let normalized = Path::new(&full_path).normalize();
    normalized
        .to_str()
        .map(|s| s.replace('\\', "/"))
        .ok_or_else(|| format!("Invalid UTF-8 in path: {:?}", normalized))
}

/// Rewrite `file` properties to asset-root-relative paths.
///
/// Values that cannot be resolved are left untouched and will fail when loaded.
pub(crate) fn normalize_property_paths(properties: &mut Properties, asset_path: &Path) {
    for property in properties.iter_mut() {
        if property.property_type.as_deref() != Some("file") || property.value.is_empty() {
            continue;
        }
        if let Ok(resolved) = resolve_relative_path(asset_path, &property.value) {
            property.value = resolved;
        }
    }
}
