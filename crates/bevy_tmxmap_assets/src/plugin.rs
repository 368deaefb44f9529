use bevy::prelude::*;

use crate::assets::{map::TmxMapAsset, tileset::TmxTilesetAsset};
use crate::loaders::{map::TmxMapAssetLoader, tileset::TmxTilesetAssetLoader};

/// Configuration for [`TmxmapAssetsPlugin`].
///
/// Inserted as a resource so other systems can inspect how assets were loaded.
#[derive(Resource, Debug, Clone)]
pub struct TmxmapAssetsConfig {
    /// Load tileset images (atlas or per-tile) as dependencies. Turn off for headless
    /// tools that only need the parsed data.
    pub load_images: bool,
}

impl Default for TmxmapAssetsConfig {
    fn default() -> Self {
        Self { load_images: true }
    }
}

/// Plugin that registers the Tiled asset types and loaders
///
/// This plugin enables loading Tiled files (.tmx, .tsx) as Bevy assets.
///
/// # Example
/// ```no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap_assets::TmxmapAssetsPlugin;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(TmxmapAssetsPlugin::default())
///     .run();
/// ```
///
/// # What this plugin does
///
/// - Registers 2 asset types: `TmxMapAsset`, `TmxTilesetAsset`
/// - Registers 2 asset loaders for `.tmx` and `.tsx` files
///
/// # What this plugin does NOT do
///
/// - Entity spawning
/// - Rendering
#[derive(Default)]
pub struct TmxmapAssetsPlugin {
    config: TmxmapAssetsConfig,
}

impl TmxmapAssetsPlugin {
    /// Create a new plugin with custom configuration.
    pub fn new(config: TmxmapAssetsConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TmxmapAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<TmxMapAsset>()
            .init_asset::<TmxTilesetAsset>();

        app.register_asset_loader(TmxTilesetAssetLoader {
            load_images: self.config.load_images,
        })
        .register_asset_loader(TmxMapAssetLoader);

        app.insert_resource(self.config.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_registers_assets_and_config() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(TmxmapAssetsPlugin::new(TmxmapAssetsConfig { load_images: false }));

        assert!(app.world().contains_resource::<Assets<TmxMapAsset>>());
        assert!(app.world().contains_resource::<Assets<TmxTilesetAsset>>());
        assert!(!app.world().resource::<TmxmapAssetsConfig>().load_images);
    }
}
