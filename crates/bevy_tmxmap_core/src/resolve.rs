//! GID ownership and atlas geometry.
//!
//! A map refers to tiles by global id. Each [`TilesetReference`] claims the range
//! starting at its `first_gid` and ending just before the next reference's; the last
//! reference claims everything above. Inside the owning tileset, the local index
//! `gid - first_gid` is laid out row-major across the atlas image.

use crate::map::TilesetReference;
use crate::tileset::{Tile, Tileset};

/// Pixel rectangle of a tile inside its atlas image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Index into `references` of the reference owning `gid`.
///
/// References are expected in ascending `first_gid` order, as Tiled writes them.
/// When no interior range matches, the last reference is returned, so this resolves
/// whenever `references` is non-empty. GID 0 (empty cell) is not special-cased.
pub fn resolve_tileset_index(gid: u32, references: &[TilesetReference]) -> Option<usize> {
    references
        .windows(2)
        .position(|pair| pair[0].first_gid <= gid && gid < pair[1].first_gid)
        .or_else(|| references.len().checked_sub(1))
}

/// The reference owning `gid`. See [`resolve_tileset_index`].
pub fn resolve_tileset(gid: u32, references: &[TilesetReference]) -> Option<&TilesetReference> {
    resolve_tileset_index(gid, references).map(|index| &references[index])
}

/// Atlas `(column, row)` of the tile `gid` within `tileset`.
///
/// `None` when `gid` lies below `reference.first_gid` or the local index is not
/// below the tileset's tile count.
pub fn source_cell(reference: &TilesetReference, tileset: &Tileset, gid: u32) -> Option<(u32, u32)> {
    let local = gid.checked_sub(reference.first_gid)?;
    atlas_cell(tileset, local)
}

/// Pixel rectangle of the tile `gid` within `tileset`'s atlas image.
pub fn source_rect(reference: &TilesetReference, tileset: &Tileset, gid: u32) -> Option<SourceRect> {
    let local = gid.checked_sub(reference.first_gid)?;
    tileset.source_rect(local)
}

/// Metadata entry for the tile `gid`, if its tileset defines one.
pub fn tile_for_gid<'a>(
    reference: &TilesetReference,
    tileset: &'a Tileset,
    gid: u32,
) -> Option<&'a Tile> {
    let local = gid.checked_sub(reference.first_gid)?;
    tileset.tile(local)
}

/// Row-major placement of `local` using whole tiles per image row.
///
/// Margin and spacing are ignored. Without an image or with a zero tile width there
/// are no columns and every tile stays on row 0.
pub(crate) fn atlas_cell(tileset: &Tileset, local: u32) -> Option<(u32, u32)> {
    if local >= tileset.tile_count {
        return None;
    }
    match tileset.atlas_columns() {
        0 => Some((local, 0)),
        columns => Some((local % columns, local / columns)),
    }
}
