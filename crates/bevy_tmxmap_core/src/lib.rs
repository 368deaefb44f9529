//! # `bevy_tmxmap_core`
//!
//! Engine-free parsing backbone for `bevy_tmxmap`. Turns Tiled map (`.tmx`) and
//! tileset (`.tsx`) XML documents into a plain, immutable data model.
//!
//! **This crate does NOT depend on Bevy.** The asset loaders in
//! `bevy_tmxmap_assets` wrap it; anything else that can hand over document text
//! (tools, tests, other engines) can use it directly.
//!
//! ## What this crate provides
//!
//! 1. **Data model**: [`Map`], [`Layer`], [`Object`], [`Tileset`], [`Tile`] and friends
//! 2. **Cell decoding**: packed 32-bit cells split into a clean GID and [`FlipFlags`]
//! 3. **GID resolution**: which [`TilesetReference`] owns a GID
//! 4. **Atlas geometry**: the [`SourceRect`] of a tile inside its tileset image
//! 5. **File helpers**: [`Map::from_file`], [`Tileset::from_file`], [`Map::load_tilesets`]
//!
//! Only `csv` tile-layer data is supported; other encodings fail with
//! [`TmxError::UnsupportedEncoding`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use bevy_tmxmap_core::prelude::*;
//!
//! # fn main() -> bevy_tmxmap_core::Result<()> {
//! let map = Map::from_file("assets/maps/level1.tmx")?;
//! let tilesets = map.load_tilesets("assets/maps")?;
//!
//! for (layer, tiles) in map.tile_layers() {
//!     for (column, row, gid, flags) in tiles.iter_tiles() {
//!         let Some(reference) = map.tileset_for_gid(gid) else {
//!             continue;
//!         };
//!         let Some(tileset) = tilesets.get(&reference.first_gid) else {
//!             continue;
//!         };
//!         let rect = source_rect(reference, tileset, gid);
//!         println!("{} ({column}, {row}): {rect:?} {flags:?}", layer.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod cell;
pub mod error;
pub mod loader;
pub mod map;
pub mod object;
pub mod property;
pub mod resolve;
pub mod tileset;

mod xml;

pub use cell::{FlipFlags, decode_cell, encode_cell};
pub use error::{DocumentError, Result, TmxError};
pub use map::{Layer, LayerData, Map, TileData, TilesetReference};
pub use object::{Object, ObjectShape};
pub use property::{Properties, Property};
pub use resolve::{SourceRect, resolve_tileset, source_cell, source_rect, tile_for_gid};
pub use tileset::{Frame, ObjectAlignment, Terrain, Tile, Tileset, TilesetImage};

pub mod prelude {
    //! Common imports for `bevy_tmxmap_core` users.

    pub use crate::cell::FlipFlags;
    pub use crate::error::{DocumentError, TmxError};
    pub use crate::map::{Layer, LayerData, Map, TileData, TilesetReference};
    pub use crate::object::{Object, ObjectShape};
    pub use crate::property::{Properties, Property};
    pub use crate::resolve::{SourceRect, resolve_tileset, source_rect, tile_for_gid};
    pub use crate::tileset::{Frame, ObjectAlignment, Terrain, Tile, Tileset, TilesetImage};
}
