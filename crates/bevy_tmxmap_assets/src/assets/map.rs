use bevy::prelude::*;
use bevy_tmxmap_core::{Map, resolve::resolve_tileset_index};

use crate::assets::tileset::TmxTilesetAsset;

/// Bevy asset wrapper for Tiled maps (.tmx files)
///
/// The parsed map is kept as-is; tilesets it references are loaded as dependent assets.
#[derive(TypePath, Asset, Debug)]
pub struct TmxMapAsset {
    /// The parsed map data
    ///
    /// Properties of type `file` have already been rewritten to asset-root-relative paths.
    pub map: Map,

    // ===== BEVY ASSET REFERENCES =====
    /// Tileset handles, parallel to `map.tilesets`
    pub tilesets: Vec<TilesetHandle>,

    // ===== PROCESSED DATA FOR BEVY =====
    /// Map size in tiles
    pub tilemap_size: UVec2,

    /// Map tile size in pixels
    pub tile_size: UVec2,

    /// Map bounding box in pixels
    pub rect: Rect,
}

#[derive(Debug, Clone)]
pub struct TilesetHandle {
    /// Bevy asset handle to the tileset
    pub handle: Handle<TmxTilesetAsset>,
    /// First GID of this tileset in the map
    pub first_gid: u32,
}

impl TmxMapAsset {
    /// Tileset handle owning `gid`.
    ///
    /// Follows the same ownership rule as [`bevy_tmxmap_core::resolve_tileset`]; callers
    /// should skip empty cells (GID 0) themselves.
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&TilesetHandle> {
        resolve_tileset_index(gid, &self.map.tilesets).and_then(|index| self.tilesets.get(index))
    }
}
