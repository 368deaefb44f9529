//! Map documents (`.tmx`): tileset references, tile layers and object groups.

use std::str::FromStr;

use roxmltree::Node;
use tracing::{debug, trace};

use crate::cell::{FlipFlags, decode_csv};
use crate::error::{DocumentError, Result, TmxError};
use crate::object::{Object, parse_objects};
use crate::property::{Properties, parse_properties};
use crate::resolve;
use crate::xml;

/// A parsed Tiled map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map {
    /// Tiled version that wrote the document.
    pub version: String,
    pub properties: Properties,
    /// External tilesets, in document order (ascending `first_gid`).
    pub tilesets: Vec<TilesetReference>,
    /// Tile layers in document order, followed by object groups in document order.
    pub layers: Vec<Layer>,
    pub orientation: String,
    pub render_order: String,
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
}

/// Reference from a map to an external tileset document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilesetReference {
    /// GID of the referenced tileset's local tile 0.
    pub first_gid: u32,
    /// Path of the `.tsx` document, relative to the map.
    pub source: String,
}

/// A map layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    /// Width in tiles.
    pub width: u32,
    /// Height in tiles.
    pub height: u32,
    pub visible: bool,
    pub properties: Properties,
    pub data: LayerData,
}

/// Payload of a [`Layer`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Tiles(TileData),
    Objects(Vec<Object>),
}

impl Layer {
    /// Cell data, for tile layers.
    pub fn tile_data(&self) -> Option<&TileData> {
        match &self.data {
            LayerData::Tiles(tiles) => Some(tiles),
            LayerData::Objects(_) => None,
        }
    }

    /// Objects, for object groups.
    pub fn objects(&self) -> Option<&[Object]> {
        match &self.data {
            LayerData::Tiles(_) => None,
            LayerData::Objects(objects) => Some(objects),
        }
    }

    pub fn is_tile_layer(&self) -> bool {
        matches!(self.data, LayerData::Tiles(_))
    }
}

/// Cell grid of a tile layer.
///
/// `cells[i]` is the clean GID at row-major index `i` (0 = empty) and `flip_flags[i]`
/// its orientation. Indexing helpers take either a linear index or a
/// `(column, row)` pair mapped to `column + row * width`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TileData {
    /// Layer width in tiles.
    pub width: u32,
    pub cells: Vec<u32>,
    pub flip_flags: Vec<FlipFlags>,
}

impl TileData {
    /// Linear index of `(column, row)`.
    pub fn index_of(&self, column: u32, row: u32) -> usize {
        column as usize + row as usize * self.width as usize
    }

    /// GID and flags at `(column, row)`, or `None` outside the grid.
    pub fn get(&self, column: u32, row: u32) -> Option<(u32, FlipFlags)> {
        if column >= self.width {
            return None;
        }
        let index = self.index_of(column, row);
        Some((*self.cells.get(index)?, *self.flip_flags.get(index)?))
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the cell array.
    pub fn is_flipped_horizontal(&self, index: usize) -> bool {
        self.flip_flags[index].contains(FlipFlags::HORIZONTAL)
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the cell array.
    pub fn is_flipped_vertical(&self, index: usize) -> bool {
        self.flip_flags[index].contains(FlipFlags::VERTICAL)
    }

    /// # Panics
    ///
    /// Panics if `index` is outside the cell array.
    pub fn is_flipped_diagonal(&self, index: usize) -> bool {
        self.flip_flags[index].contains(FlipFlags::DIAGONAL)
    }

    /// # Panics
    ///
    /// Panics if `(column, row)` maps outside the cell array.
    pub fn is_flipped_horizontal_at(&self, column: u32, row: u32) -> bool {
        self.is_flipped_horizontal(self.index_of(column, row))
    }

    /// # Panics
    ///
    /// Panics if `(column, row)` maps outside the cell array.
    pub fn is_flipped_vertical_at(&self, column: u32, row: u32) -> bool {
        self.is_flipped_vertical(self.index_of(column, row))
    }

    /// # Panics
    ///
    /// Panics if `(column, row)` maps outside the cell array.
    pub fn is_flipped_diagonal_at(&self, column: u32, row: u32) -> bool {
        self.is_flipped_diagonal(self.index_of(column, row))
    }

    /// Iterate non-empty cells as `(column, row, gid, flags)`.
    pub fn iter_tiles(&self) -> impl Iterator<Item = (u32, u32, u32, FlipFlags)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .zip(&self.flip_flags)
            .enumerate()
            .filter(|(_, (gid, _))| **gid != 0)
            .map(move |(index, (gid, flags))| {
                let index = index as u32;
                (index % width, index / width, *gid, *flags)
            })
    }
}

impl Map {
    /// Parse a map from the text of a `.tmx` document.
    pub fn parse_str(text: &str) -> Result<Self> {
        parse_map(text).map_err(|error| TmxError::from_document("map", error))
    }

    /// Tileset reference owning `gid`. See [`resolve::resolve_tileset`].
    pub fn tileset_for_gid(&self, gid: u32) -> Option<&TilesetReference> {
        resolve::resolve_tileset(gid, &self.tilesets)
    }

    /// Iterate tile layers only.
    pub fn tile_layers(&self) -> impl Iterator<Item = (&Layer, &TileData)> {
        self.layers
            .iter()
            .filter_map(|layer| layer.tile_data().map(|tiles| (layer, tiles)))
    }

    /// Iterate object groups only.
    pub fn object_groups(&self) -> impl Iterator<Item = (&Layer, &[Object])> {
        self.layers
            .iter()
            .filter_map(|layer| layer.objects().map(|objects| (layer, objects)))
    }

    /// Map size in pixels, widened so any declared size fits.
    pub fn pixel_size(&self) -> (u64, u64) {
        (
            u64::from(self.width) * u64::from(self.tile_width),
            u64::from(self.height) * u64::from(self.tile_height),
        )
    }
}

impl FromStr for Map {
    type Err = TmxError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse_str(text)
    }
}

fn parse_map(text: &str) -> Result<Map, DocumentError> {
    let document = xml::parse_document(text)?;
    let root = xml::root(&document, "map")?;

    let version = xml::attr(root, "tiledversion")?.to_owned();
    let orientation = xml::attr(root, "orientation")?.to_owned();
    let render_order = xml::attr(root, "renderorder")?.to_owned();
    let width: u32 = xml::parse_attr(root, "width")?;
    let height: u32 = xml::parse_attr(root, "height")?;
    let tile_width = xml::parse_attr(root, "tilewidth")?;
    let tile_height = xml::parse_attr(root, "tileheight")?;

    let properties = parse_properties(root)?;
    let tilesets = xml::children(root, "tileset")
        .map(parse_tileset_reference)
        .collect::<Result<Vec<_>, _>>()?;

    // Tile layers come first, then object groups, each in document order.
    let mut layers = xml::children(root, "layer")
        .map(parse_tile_layer)
        .collect::<Result<Vec<_>, _>>()?;
    for node in xml::children(root, "objectgroup") {
        layers.push(parse_object_group(node, width, height)?);
    }

    debug!(
        version = %version,
        width,
        height,
        tilesets = tilesets.len(),
        layers = layers.len(),
        "parsed map"
    );

    Ok(Map {
        version,
        properties,
        tilesets,
        layers,
        orientation,
        render_order,
        width,
        height,
        tile_width,
        tile_height,
    })
}

fn parse_tileset_reference(node: Node<'_, '_>) -> Result<TilesetReference, DocumentError> {
    Ok(TilesetReference {
        first_gid: xml::parse_attr(node, "firstgid")?,
        source: xml::attr(node, "source")?.to_owned(),
    })
}

fn parse_tile_layer(node: Node<'_, '_>) -> Result<Layer, DocumentError> {
    let id = xml::parse_attr(node, "id")?;
    let name = xml::attr(node, "name")?.to_owned();
    let width = xml::parse_attr(node, "width")?;
    let height = xml::parse_attr(node, "height")?;
    let visible = node.attribute("visible") == Some("1");

    let data = xml::required_child(node, "data")?;
    match data.attribute("encoding") {
        Some("csv") => {}
        other => {
            // A missing encoding means per-tile <tile> elements.
            return Err(DocumentError::UnsupportedEncoding {
                layer: name,
                encoding: other.unwrap_or("xml").to_owned(),
            });
        }
    }

    let (cells, flip_flags) = decode_csv(&name, &xml::inner_text(data))?;
    trace!(layer = %name, cells = cells.len(), "decoded tile layer");

    Ok(Layer {
        id,
        properties: parse_properties(node)?,
        name,
        width,
        height,
        visible,
        data: LayerData::Tiles(TileData {
            width,
            cells,
            flip_flags,
        }),
    })
}

/// Object groups span the whole map and are always visible.
fn parse_object_group(
    node: Node<'_, '_>,
    map_width: u32,
    map_height: u32,
) -> Result<Layer, DocumentError> {
    let id = xml::parse_attr(node, "id")?;
    let name = xml::attr(node, "name")?.to_owned();
    let objects = parse_objects(node)?;
    trace!(layer = %name, objects = objects.len(), "parsed object group");

    Ok(Layer {
        id,
        name,
        width: map_width,
        height: map_height,
        visible: true,
        properties: parse_properties(node)?,
        data: LayerData::Objects(objects),
    })
}
