//! # bevy_tmxmap
//!
//! Tiled map loading for Bevy.
//!
//! This is a meta-crate that combines the `bevy_tmxmap_*` sub-crates behind one plugin
//! and one prelude.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bevy::prelude::*;
//! use bevy_tmxmap::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(BevyTmxmapPlugin::default())
//!         .add_systems(Startup, load_map)
//!         .add_systems(Update, inspect_map)
//!         .run();
//! }
//!
//! #[derive(Resource)]
//! struct Level(Handle<TmxMapAsset>);
//!
//! fn load_map(mut commands: Commands, asset_server: Res<AssetServer>) {
//!     commands.insert_resource(Level(asset_server.load("maps/level1.tmx")));
//! }
//!
//! fn inspect_map(level: Res<Level>, maps: Res<Assets<TmxMapAsset>>) {
//!     if let Some(map) = maps.get(&level.0) {
//!         for (layer, tiles) in map.map.tile_layers() {
//!             info!("{}: {} cells", layer.name, tiles.cells.len());
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - **[`core`]**: Engine-free TMX/TSX parsing, cell decoding, GID and atlas resolution
//! - **[`assets`]**: Bevy asset loaders for `.tmx` and `.tsx` files
//!
//! ## Using Individual Crates
//!
//! `bevy_tmxmap_core` has no Bevy dependency and can be used on its own:
//!
//! ```rust,no_run
//! use bevy_tmxmap_core::prelude::*;
//!
//! let map = Map::from_file("assets/maps/level1.tmx").unwrap();
//! let tilesets = map.load_tilesets("assets/maps").unwrap();
//! let reference = map.tileset_for_gid(1).unwrap();
//! let rect = source_rect(reference, &tilesets[&reference.first_gid], 1);
//! ```

pub mod plugin;

// Re-export sub-crates for advanced usage
pub use bevy_tmxmap_assets as assets;
pub use bevy_tmxmap_core as core;

/// Unified prelude for bevy_tmxmap
///
/// This module re-exports the most commonly used types from all sub-crates
/// for convenient access.
pub mod prelude {
    pub use crate::assets::prelude::*;
    pub use crate::core::prelude::*;

    // Unified plugin
    pub use crate::plugin::BevyTmxmapPlugin;
}
