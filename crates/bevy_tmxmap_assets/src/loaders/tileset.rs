use std::path::Path;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    platform::collections::HashMap,
    prelude::*,
    tasks::ConditionalSendFuture,
};
use bevy_tmxmap_core::{Tileset, TmxError};
use thiserror::Error;

use crate::assets::tileset::{TmxTilesetAsset, calculate_grid_size};
use crate::loaders::{normalize_property_paths, resolve_relative_path};

/// Asset loader for Tiled tilesets (.tsx files)
///
/// Supports both texture atlas tilesets (single spritesheet) and image collection
/// tilesets (individual images per tile).
#[derive(Clone)]
pub struct TmxTilesetAssetLoader {
    /// Issue image dependency loads for the atlas / per-tile images.
    pub load_images: bool,
}

impl Default for TmxTilesetAssetLoader {
    fn default() -> Self {
        Self { load_images: true }
    }
}

#[derive(Debug, Error)]
pub enum TilesetLoaderError {
    #[error("Failed to load tileset: {0}")]
    Tmx(#[from] TmxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Tileset is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AssetLoader for TmxTilesetAssetLoader {
    type Asset = TmxTilesetAsset;
    type Settings = ();
    type Error = TilesetLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let text = std::str::from_utf8(&bytes)?;

            let asset_path = load_context.asset_path().path().to_path_buf();
            let mut tileset = Tileset::parse_str(text)
                .map_err(|error| error.in_document(asset_path.display().to_string()))?;

            let mut atlas_image = None;
            let mut tile_images = HashMap::default();
            match image_sources(&tileset, self.load_images) {
                ImageSources::None => {}
                // TEXTURE ATLAS MODE: Single spritesheet
                ImageSources::Atlas(source) => {
                    let image_path = resolve_relative_path(&asset_path, source)
                        .map_err(TilesetLoaderError::InvalidPath)?;
                    atlas_image = Some(load_context.load(image_path));
                }
                // IMAGE COLLECTION MODE: Per-tile images
                ImageSources::Collection(sources) => {
                    for (tile_id, source) in sources {
                        let image_path = resolve_relative_path(&asset_path, source)
                            .map_err(TilesetLoaderError::InvalidPath)?;
                        tile_images.insert(tile_id, load_context.load(image_path));
                    }
                }
            }

            normalize_tileset_properties(&mut tileset, &asset_path);

            let tile_size = UVec2::new(tileset.tile_width, tileset.tile_height);
            let grid_size = calculate_grid_size(&tileset);

            debug!(
                "Loaded tileset {:?}: {} tiles, {} tile images",
                asset_path,
                tileset.tile_count,
                tile_images.len()
            );

            Ok(TmxTilesetAsset {
                tileset,
                atlas_image,
                tile_images,
                tile_size,
                grid_size,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tsx"]
    }
}

/// Image files a tileset loader should request.
#[derive(Debug, PartialEq, Eq)]
enum ImageSources<'a> {
    /// Image loading is disabled.
    None,
    Atlas(&'a str),
    /// `(local tile id, source)` for every tile that carries its own image.
    Collection(Vec<(u32, &'a str)>),
}

fn image_sources(tileset: &Tileset, load_images: bool) -> ImageSources<'_> {
    if !load_images {
        return ImageSources::None;
    }
    match &tileset.image {
        Some(image) => ImageSources::Atlas(&image.source),
        None => ImageSources::Collection(
            tileset
                .tiles
                .iter()
                .filter_map(|tile| Some((tile.id, tile.image.as_ref()?.source.as_str())))
                .collect(),
        ),
    }
}

/// Normalize `file` properties on the tileset, its tiles and their collision shapes.
fn normalize_tileset_properties(tileset: &mut Tileset, asset_path: &Path) {
    normalize_property_paths(&mut tileset.properties, asset_path);
    for tile in &mut tileset.tiles {
        normalize_property_paths(&mut tile.properties, asset_path);
        for object in &mut tile.objects {
            normalize_property_paths(&mut object.properties, asset_path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATLAS: &str = r#"<tileset tiledversion="1.10" tilewidth="16" tileheight="16" tilecount="4" columns="2">
 <image source="../images/terrain.png" width="32" height="32"/>
 <tile id="1"><image source="ignored.png" width="16" height="16"/></tile>
</tileset>"#;

    const COLLECTION: &str = r#"<tileset tiledversion="1.10" tilewidth="16" tileheight="16" tilecount="3" columns="0">
 <properties><property name="palette" type="file" value="../palettes/cave.hex"/></properties>
 <tile id="0"><image source="a.png" width="16" height="16"/></tile>
 <tile id="1">
  <properties><property name="sound" type="file" value="sfx/step.ogg"/></properties>
 </tile>
 <tile id="2">
  <image source="../c.png" width="16" height="16"/>
  <objectgroup><object id="1" x="0" y="0"><properties><property name="script" type="file" value="hit.lua"/></properties></object></objectgroup>
 </tile>
</tileset>"#;

    #[test]
    fn test_atlas_tileset_requests_only_the_atlas() {
        let tileset = Tileset::parse_str(ATLAS).unwrap();
        assert_eq!(
            image_sources(&tileset, true),
            ImageSources::Atlas("../images/terrain.png")
        );
    }

    #[test]
    fn test_collection_tileset_requests_tile_images() {
        let tileset = Tileset::parse_str(COLLECTION).unwrap();
        assert_eq!(
            image_sources(&tileset, true),
            ImageSources::Collection(vec![(0, "a.png"), (2, "../c.png")])
        );
    }

    #[test]
    fn test_disabled_image_loading_requests_nothing() {
        assert_eq!(
            image_sources(&Tileset::parse_str(ATLAS).unwrap(), false),
            ImageSources::None
        );
        assert_eq!(
            image_sources(&Tileset::parse_str(COLLECTION).unwrap(), false),
            ImageSources::None
        );
    }

    #[test]
    fn test_normalize_tileset_properties() {
        let mut tileset = Tileset::parse_str(COLLECTION).unwrap();
        normalize_tileset_properties(&mut tileset, Path::new("tilesets/cave.tsx"));

        assert_eq!(tileset.properties.get("palette"), Some("palettes/cave.hex"));
        assert_eq!(
            tileset.tile(1).unwrap().properties.get("sound"),
            Some("tilesets/sfx/step.ogg")
        );
        assert_eq!(
            tileset.tile(2).unwrap().objects[0].properties.get("script"),
            Some("tilesets/hit.lua")
        );
    }
}
