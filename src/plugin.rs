//! Unified plugin for bevy_tmxmap.

use bevy::prelude::*;

use bevy_tmxmap_assets::{TmxmapAssetsConfig, TmxmapAssetsPlugin};

/// Unified plugin that adds all bevy_tmxmap functionality.
///
/// Currently this is asset loading ([`TmxmapAssetsPlugin`]) for `.tmx` and `.tsx` files.
///
/// # Example
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(BevyTmxmapPlugin::default())
///     .run();
/// ```
///
/// # With Custom Configuration
///
/// ```rust,no_run
/// use bevy::prelude::*;
/// use bevy_tmxmap::prelude::*;
///
/// App::new()
///     .add_plugins(MinimalPlugins)
///     .add_plugins(AssetPlugin::default())
///     .add_plugins(
///         BevyTmxmapPlugin::default()
///             .with_assets(TmxmapAssetsConfig { load_images: false })
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct BevyTmxmapPlugin {
    /// Asset loading configuration
    pub assets: TmxmapAssetsConfig,
}

impl BevyTmxmapPlugin {
    /// Create with custom asset loading configuration
    pub fn with_assets(mut self, config: TmxmapAssetsConfig) -> Self {
        self.assets = config;
        self
    }
}

impl Plugin for BevyTmxmapPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TmxmapAssetsPlugin::new(self.assets.clone()));

        info!("BevyTmxmapPlugin initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::{TmxMapAsset, TmxTilesetAsset};

    #[test]
    fn test_unified_plugin_adds_asset_loading() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .add_plugins(
                BevyTmxmapPlugin::default().with_assets(TmxmapAssetsConfig { load_images: false }),
            );

        assert!(app.world().contains_resource::<Assets<TmxMapAsset>>());
        assert!(app.world().contains_resource::<Assets<TmxTilesetAsset>>());
        assert!(!app.world().resource::<TmxmapAssetsConfig>().load_images);
    }
}
