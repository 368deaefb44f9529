//! # `bevy_tmxmap_assets`
//!
//! Bevy asset loaders for Tiled maps (`.tmx`) and tilesets (`.tsx`), built on the
//! parsers in `bevy_tmxmap_core`. Relative paths inside documents are resolved
//! against the loading asset and loaded as dependencies.

pub mod assets;
pub mod loaders;
pub mod plugin;

// Re-export the plugin for convenience
pub use plugin::{TmxmapAssetsConfig, TmxmapAssetsPlugin};

/// Prelude module for convenient imports
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap_assets::prelude::*;
///
/// fn my_system(maps: Res<Assets<TmxMapAsset>>) {
///     // Use Tiled assets...
/// }
/// ```
pub mod prelude {
    pub use crate::assets::{
        map::{TilesetHandle, TmxMapAsset},
        tileset::TmxTilesetAsset,
    };
    pub use crate::loaders::{map::MapLoaderError, tileset::TilesetLoaderError};
    pub use crate::plugin::{TmxmapAssetsConfig, TmxmapAssetsPlugin};
}
