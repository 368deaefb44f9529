//! Tileset documents (`.tsx`).

use std::str::FromStr;
use std::time::Duration;

use roxmltree::Node;
use tracing::debug;

use crate::error::{DocumentError, Result, TmxError};
use crate::object::{Object, parse_objects};
use crate::property::{Properties, parse_properties};
use crate::resolve::{self, SourceRect};
use crate::xml;

/// A parsed Tiled tileset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tileset {
    /// Tiled version that wrote the document.
    pub version: String,
    pub name: Option<String>,
    pub object_alignment: ObjectAlignment,
    pub tile_width: u32,
    pub tile_height: u32,
    pub tile_count: u32,
    pub columns: u32,
    /// Atlas image. `None` for image-collection tilesets.
    pub image: Option<TilesetImage>,
    pub spacing: u32,
    pub margin: u32,
    /// Metadata for the tiles that carry any; most tiles have no entry.
    pub tiles: Vec<Tile>,
    pub terrains: Vec<Terrain>,
    pub properties: Properties,
}

/// Anchor of tile objects relative to their position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectAlignment {
    TopLeft,
    Top,
    TopRight,
    Center,
    CenterLeft,
    CenterRight,
    Bottom,
    BottomLeft,
    BottomRight,
    #[default]
    Unspecified,
}

impl ObjectAlignment {
    /// Case-insensitive lookup; unknown names map to [`ObjectAlignment::Unspecified`].
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "topleft" => Self::TopLeft,
            "top" => Self::Top,
            "topright" => Self::TopRight,
            "center" => Self::Center,
            "centerleft" => Self::CenterLeft,
            "centerright" => Self::CenterRight,
            "bottom" => Self::Bottom,
            "bottomleft" => Self::BottomLeft,
            "bottomright" => Self::BottomRight,
            _ => Self::Unspecified,
        }
    }
}

/// An image reference with its declared pixel size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TilesetImage {
    /// Path relative to the tileset document.
    pub source: String,
    pub width: u32,
    pub height: u32,
}

/// Per-tile metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tile {
    /// Local id within the tileset.
    pub id: u32,
    /// Terrain index per corner (top-left, top-right, bottom-left, bottom-right);
    /// -1 marks a corner without terrain.
    pub terrain: Option<[i32; 4]>,
    pub animation: Vec<Frame>,
    /// Collision shapes.
    pub objects: Vec<Object>,
    pub tile_type: Option<String>,
    pub properties: Properties,
    /// Per-tile image, for image-collection tilesets.
    pub image: Option<TilesetImage>,
}

impl Tile {
    pub fn is_animated(&self) -> bool {
        !self.animation.is_empty()
    }
}

/// One frame of a tile animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    /// Local tile id shown during this frame.
    pub tile_id: u32,
    pub duration: Duration,
}

/// A terrain type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Terrain {
    pub name: String,
    /// Local id of the tile representing this terrain.
    pub tile: i32,
}

impl Tileset {
    /// Parse a tileset from the text of a `.tsx` document.
    pub fn parse_str(text: &str) -> Result<Self> {
        parse_tileset(text).map_err(|error| TmxError::from_document("tileset", error))
    }

    /// Metadata entry for local tile `id`, if the tileset defines one.
    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Width of the atlas image in pixels, 0 without an atlas.
    pub fn image_width(&self) -> u32 {
        self.image.as_ref().map_or(0, |image| image.width)
    }

    /// Whole tiles per atlas row, derived from the image width.
    ///
    /// Margin and spacing are not taken into account.
    pub fn atlas_columns(&self) -> u32 {
        self.image_width()
            .checked_div(self.tile_width)
            .unwrap_or_default()
    }

    pub fn is_image_collection(&self) -> bool {
        self.image.is_none()
    }

    /// Atlas `(column, row)` of local tile `local_id`. See [`resolve::source_cell`].
    pub fn source_cell(&self, local_id: u32) -> Option<(u32, u32)> {
        resolve::atlas_cell(self, local_id)
    }

    /// Atlas rectangle of local tile `local_id`. See [`resolve::source_rect`].
    ///
    /// `None` when the rectangle's corner does not fit in `u32` pixels.
    pub fn source_rect(&self, local_id: u32) -> Option<SourceRect> {
        let (column, row) = self.source_cell(local_id)?;
        Some(SourceRect {
            x: column.checked_mul(self.tile_width)?,
            y: row.checked_mul(self.tile_height)?,
            width: self.tile_width,
            height: self.tile_height,
        })
    }
}

impl FromStr for Tileset {
    type Err = TmxError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse_str(text)
    }
}

fn parse_tileset(text: &str) -> Result<Tileset, DocumentError> {
    let document = xml::parse_document(text)?;
    let root = xml::root(&document, "tileset")?;

    let version = xml::attr(root, "tiledversion")?.to_owned();
    let name = xml::attr_owned(root, "name");
    let object_alignment = root
        .attribute("objectalignment")
        .map(ObjectAlignment::from_name)
        .unwrap_or_default();
    let tile_width = xml::parse_attr(root, "tilewidth")?;
    let tile_height = xml::parse_attr(root, "tileheight")?;
    let tile_count: u32 = xml::parse_attr(root, "tilecount")?;
    let columns = xml::parse_attr(root, "columns")?;
    let margin = xml::parse_attr_or(root, "margin", 0)?;
    let spacing = xml::parse_attr_or(root, "spacing", 0)?;

    let image = xml::child(root, "image").map(parse_image).transpose()?;
    let tiles = xml::children(root, "tile")
        .map(parse_tile)
        .collect::<Result<Vec<_>, _>>()?;
    let properties = parse_properties(root)?;
    let terrains = xml::select(root, "terraintypes", "terrain")
        .map(parse_terrain)
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        name = name.as_deref().unwrap_or_default(),
        tile_count,
        tiles = tiles.len(),
        "parsed tileset"
    );

    Ok(Tileset {
        version,
        name,
        object_alignment,
        tile_width,
        tile_height,
        tile_count,
        columns,
        image,
        spacing,
        margin,
        tiles,
        terrains,
        properties,
    })
}

fn parse_image(node: Node<'_, '_>) -> Result<TilesetImage, DocumentError> {
    Ok(TilesetImage {
        source: xml::attr(node, "source")?.to_owned(),
        width: xml::parse_attr(node, "width")?,
        height: xml::parse_attr(node, "height")?,
    })
}

fn parse_tile(node: Node<'_, '_>) -> Result<Tile, DocumentError> {
    let id: u32 = xml::parse_attr(node, "id")?;
    let terrain = node
        .attribute("terrain")
        .map(|value| parse_terrain_slots(id, value))
        .transpose()?;
    let animation = xml::select(node, "animation", "frame")
        .map(parse_frame)
        .collect::<Result<Vec<_>, _>>()?;
    // Collision shapes are local geometry and never reference map tilesets.
    let objects = match xml::child(node, "objectgroup") {
        Some(group) => parse_objects(group)?,
        None => Vec::new(),
    };
    let image = xml::child(node, "image").map(parse_image).transpose()?;

    Ok(Tile {
        id,
        terrain,
        animation,
        objects,
        tile_type: xml::attr_owned(node, "type"),
        properties: parse_properties(node)?,
        image,
    })
}

/// Parse `"0,,1,2"`-style corner lists; empty slots become -1.
fn parse_terrain_slots(tile: u32, value: &str) -> Result<[i32; 4], DocumentError> {
    let invalid = || DocumentError::InvalidTerrain {
        tile,
        value: value.to_owned(),
    };

    let mut slots = [-1; 4];
    let mut tokens = value.split(',');
    for slot in &mut slots {
        let token = tokens.next().ok_or_else(invalid)?.trim();
        if !token.is_empty() {
            *slot = token.parse().map_err(|_| invalid())?;
        }
    }
    if tokens.next().is_some() {
        return Err(invalid());
    }

    Ok(slots)
}

fn parse_frame(node: Node<'_, '_>) -> Result<Frame, DocumentError> {
    Ok(Frame {
        tile_id: xml::parse_attr(node, "tileid")?,
        duration: Duration::from_millis(xml::parse_attr(node, "duration")?),
    })
}

fn parse_terrain(node: Node<'_, '_>) -> Result<Terrain, DocumentError> {
    Ok(Terrain {
        name: xml::attr(node, "name")?.to_owned(),
        tile: xml::parse_attr(node, "tile")?,
    })
}
