use std::path::Path;

use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    prelude::*,
    tasks::ConditionalSendFuture,
};
use bevy_tmxmap_core::{LayerData, Map, TmxError};
use thiserror::Error;

use crate::assets::{
    map::{TilesetHandle, TmxMapAsset},
    tileset::TmxTilesetAsset,
};
use crate::loaders::{normalize_property_paths, resolve_relative_path};

/// Asset loader for Tiled maps (.tmx files)
///
/// Every external tileset the map references is loaded as a dependency.
#[derive(Default)]
pub struct TmxMapAssetLoader;

#[derive(Debug, Error)]
pub enum MapLoaderError {
    #[error("Failed to load map: {0}")]
    Tmx(#[from] TmxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Map is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl AssetLoader for TmxMapAssetLoader {
    type Asset = TmxMapAsset;
    type Settings = ();
    type Error = MapLoaderError;

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
            let mut map = Map::parse_str(text)
                .map_err(|error| error.in_document(asset_path.display().to_string()))?;

            // Load tileset dependencies, parallel to map.tilesets
            let mut tilesets = Vec::with_capacity(map.tilesets.len());
            for reference in &map.tilesets {
                let tileset_path = resolve_relative_path(&asset_path, &reference.source)
                    .map_err(MapLoaderError::InvalidPath)?;
                let handle: Handle<TmxTilesetAsset> = load_context.load(tileset_path);
                tilesets.push(TilesetHandle {
                    handle,
                    first_gid: reference.first_gid,
                });
            }

            normalize_map_properties(&mut map, &asset_path);

            let tilemap_size = UVec2::new(map.width, map.height);
            let tile_size = UVec2::new(map.tile_width, map.tile_height);
            let (pixel_width, pixel_height) = map.pixel_size();
            let rect = Rect::new(0.0, 0.0, pixel_width as f32, pixel_height as f32);

            debug!(
                "Loaded map {:?}: {}x{} tiles, {} layers, {} tilesets",
                asset_path,
                map.width,
                map.height,
                map.layers.len(),
                tilesets.len()
            );

            Ok(TmxMapAsset {
                map,
                tilesets,
                tilemap_size,
                tile_size,
                rect,
            })
        }
    }

    fn extensions(&self) -> &[&str] {
        &["tmx"]
    }
}

/// Normalize `file` properties on the map, its layers and their objects.
fn normalize_map_properties(map: &mut Map, asset_path: &Path) {
    normalize_property_paths(&mut map.properties, asset_path);
    for layer in &mut map.layers {
        normalize_property_paths(&mut layer.properties, asset_path);
        if let LayerData::Objects(objects) = &mut layer.data {
            for object in objects {
                normalize_property_paths(&mut object.properties, asset_path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_map_properties() {
        let mut map = Map::parse_str(
            r#"<map tiledversion="1.10" orientation="orthogonal" renderorder="right-down" width="1" height="1" tilewidth="8" tileheight="8">
                <properties><property name="music" type="file" value="../audio/a.ogg"/></properties>
                <layer id="1" name="ground" width="1" height="1">
                    <properties><property name="overlay" type="file" value="overlay.png"/></properties>
                    <data encoding="csv">0</data>
                </layer>
                <objectgroup id="2" name="doors">
                    <object id="1" x="0" y="0">
                        <properties><property name="target" type="file" value="../maps/next.tmx"/></properties>
                    </object>
                </objectgroup>
            </map>"#,
        )
        .unwrap();

        normalize_map_properties(&mut map, Path::new("maps/level1.tmx"));

        assert_eq!(map.properties.get("music"), Some("audio/a.ogg"));
        assert_eq!(
            map.layers[0].properties.get("overlay"),
            Some("maps/overlay.png")
        );
        let doors = map.layers[1].objects().unwrap();
        assert_eq!(doors[0].properties.get("target"), Some("maps/next.tmx"));
    }
}
