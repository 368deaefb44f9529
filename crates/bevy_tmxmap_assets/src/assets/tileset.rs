use bevy::{platform::collections::HashMap, prelude::*};
use bevy_tmxmap_core::Tileset;

/// Bevy asset wrapper for Tiled tilesets (.tsx files)
///
/// Supports both texture atlas tilesets (single spritesheet) and image collection
/// tilesets (individual images per tile).
#[derive(TypePath, Asset, Debug)]
pub struct TmxTilesetAsset {
    /// Parsed tileset data, including tile metadata, animations and terrains.
    pub tileset: Tileset,

    // ===== IMAGE REFERENCES =====
    /// For texture atlas tilesets: single spritesheet image
    ///
    /// `None` for image collection tilesets, or when image loading is disabled.
    pub atlas_image: Option<Handle<Image>>,

    /// For image collection tilesets: individual tile images
    ///
    /// Key: Local tile ID (0-based, NOT GID)
    pub tile_images: HashMap<u32, Handle<Image>>,

    // ===== PROCESSED DATA FOR CONVENIENCE =====
    /// Tile size in pixels (width, height)
    pub tile_size: UVec2,

    /// Tileset grid dimensions in tiles (columns, rows)
    ///
    /// `UVec2::ZERO` for image collection tilesets.
    pub grid_size: UVec2,
}

impl TmxTilesetAsset {
    /// Check if this is an image collection tileset (vs. texture atlas)
    #[inline]
    pub fn is_image_collection(&self) -> bool {
        self.tileset.is_image_collection()
    }

    /// Get the image handle for a specific tile
    ///
    /// For texture atlas tilesets, this returns the atlas image (same for all tiles).
    /// For image collection tilesets, this returns the specific tile's image.
    pub fn get_tile_image(&self, local_tile_id: u32) -> Option<&Handle<Image>> {
        if self.is_image_collection() {
            self.tile_images.get(&local_tile_id)
        } else {
            self.atlas_image.as_ref()
        }
    }

    /// Pixel rectangle of a local tile inside the atlas image.
    ///
    /// `None` when the far corner does not fit in `u32` pixels.
    pub fn source_rect(&self, local_tile_id: u32) -> Option<URect> {
        let rect = self.tileset.source_rect(local_tile_id)?;
        let max = UVec2::new(
            rect.x.checked_add(rect.width)?,
            rect.y.checked_add(rect.height)?,
        );
        Some(URect::from_corners(UVec2::new(rect.x, rect.y), max))
    }
}

/// Calculate grid size (columns, rows) for a tileset
///
/// Image collection tilesets declare no columns and get `UVec2::ZERO`.
pub(crate) fn calculate_grid_size(tileset: &Tileset) -> UVec2 {
    if tileset.columns > 0 {
        let rows = tileset.tile_count.div_ceil(tileset.columns);
        UVec2::new(tileset.columns, rows)
    } else {
        UVec2::ZERO
    }
}
