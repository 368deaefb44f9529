//! Objects placed in object groups, or attached to tiles as collision shapes.

use roxmltree::Node;

use crate::cell::{FlipFlags, decode_cell};
use crate::error::DocumentError;
use crate::property::{Properties, parse_properties};
use crate::xml;

/// Geometric kind of an [`Object`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ObjectShape {
    #[default]
    Rectangle,
    Point,
    Ellipse,
}

/// A free-form object.
///
/// Positions and sizes are in pixels. `gid` is the clean GID of the tile drawn for
/// tile objects (0 when the object is not a tile); any flip bits carried on that GID
/// are split out into `flip_flags`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    pub id: u32,
    pub name: Option<String>,
    pub object_type: Option<String>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Clockwise rotation in degrees.
    pub rotation: i32,
    pub gid: u32,
    pub flip_flags: FlipFlags,
    pub shape: ObjectShape,
    pub properties: Properties,
}

impl Object {
    /// Whether this object draws a tile.
    pub fn is_tile(&self) -> bool {
        self.gid != 0
    }
}

pub(crate) fn parse_objects(node: Node<'_, '_>) -> Result<Vec<Object>, DocumentError> {
    xml::children(node, "object").map(parse_object).collect()
}

pub(crate) fn parse_object(node: Node<'_, '_>) -> Result<Object, DocumentError> {
    let id = xml::parse_attr(node, "id")?;
    let x = xml::parse_attr(node, "x")?;
    let y = xml::parse_attr(node, "y")?;

    let (gid, flip_flags) = decode_cell(xml::parse_attr_lenient(node, "gid", 0_u32));

    Ok(Object {
        id,
        name: xml::attr_owned(node, "name"),
        object_type: xml::attr_owned(node, "type"),
        x,
        y,
        width: xml::parse_attr_lenient(node, "width", 0.0),
        height: xml::parse_attr_lenient(node, "height", 0.0),
        rotation: parse_rotation(node)?,
        gid,
        flip_flags,
        shape: parse_shape(node),
        properties: parse_properties(node)?,
    })
}

/// Integral rotation; fractional degrees are truncated toward zero.
fn parse_rotation(node: Node<'_, '_>) -> Result<i32, DocumentError> {
    let Some(raw) = node.attribute("rotation") else {
        return Ok(0);
    };
    let text = raw.trim();
    if let Ok(degrees) = text.parse::<i32>() {
        return Ok(degrees);
    }
    match text.parse::<f32>() {
        Ok(degrees) if degrees.is_finite() => Ok(degrees as i32),
        _ => Err(DocumentError::InvalidAttribute {
            element: "object".to_owned(),
            attribute: "rotation",
            value: raw.to_owned(),
        }),
    }
}

fn parse_shape(node: Node<'_, '_>) -> ObjectShape {
    if xml::child(node, "ellipse").is_some() {
        ObjectShape::Ellipse
    } else if xml::child(node, "point").is_some() {
        ObjectShape::Point
    } else {
        ObjectShape::Rectangle
    }
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn parse(text: &str) -> Result<Object, DocumentError> {
        let document = Document::parse(text).unwrap();
        parse_object(document.root_element())
    }

    #[test]
    fn test_full_object() {
        let object = parse(
            r#"<object id="3" name="spawn" type="Player" x="16.5" y="32" width="8" height="12" rotation="90">
                <properties><property name="hp" type="int" value="10"/></properties>
            </object>"#,
        )
        .unwrap();

        assert_eq!(object.id, 3);
        assert_eq!(object.name.as_deref(), Some("spawn"));
        assert_eq!(object.object_type.as_deref(), Some("Player"));
        assert_eq!((object.x, object.y), (16.5, 32.0));
        assert_eq!((object.width, object.height), (8.0, 12.0));
        assert_eq!(object.rotation, 90);
        assert_eq!(object.gid, 0);
        assert!(!object.is_tile());
        assert_eq!(object.shape, ObjectShape::Rectangle);
        assert_eq!(object.properties.get("hp"), Some("10"));
    }

    #[test]
    fn test_optional_fields_default() {
        let object = parse(r#"<object id="1" x="0" y="0" width="wide"/>"#).unwrap();
        assert_eq!(object.name, None);
        assert_eq!(object.object_type, None);
        assert_eq!(object.width, 0.0);
        assert_eq!(object.height, 0.0);
        assert_eq!(object.rotation, 0);
        assert!(object.properties.is_empty());
    }

    #[test]
    fn test_shape_markers() {
        let ellipse = parse(r#"<object id="1" x="0" y="0"><ellipse/></object>"#).unwrap();
        assert_eq!(ellipse.shape, ObjectShape::Ellipse);

        let point = parse(r#"<object id="1" x="0" y="0"><point/></object>"#).unwrap();
        assert_eq!(point.shape, ObjectShape::Point);

        let both = parse(r#"<object id="1" x="0" y="0"><point/><ellipse/></object>"#).unwrap();
        assert_eq!(both.shape, ObjectShape::Ellipse);
    }

    #[test]
    fn test_tile_object_gid_is_decoded() {
        let object = parse(r#"<object id="9" gid="2147483660" x="0" y="0"/>"#).unwrap();
        assert_eq!(object.gid, 12);
        assert_eq!(object.flip_flags, FlipFlags::HORIZONTAL);
        assert!(object.is_tile());

        let garbage = parse(r#"<object id="9" gid="tile" x="0" y="0"/>"#).unwrap();
        assert_eq!(garbage.gid, 0);
    }

    #[test]
    fn test_fractional_rotation_truncates() {
        let object = parse(r#"<object id="1" x="0" y="0" rotation="-45.75"/>"#).unwrap();
        assert_eq!(object.rotation, -45);
        assert!(parse(r#"<object id="1" x="0" y="0" rotation="left"/>"#).is_err());
    }

    #[test]
    fn test_missing_required_fields_fail() {
        assert!(matches!(
            parse(r#"<object id="1" y="0"/>"#),
            Err(DocumentError::MissingAttribute { attribute: "x", .. })
        ));
        assert!(matches!(
            parse(r#"<object x="1" y="0"/>"#),
            Err(DocumentError::MissingAttribute { attribute: "id", .. })
        ));
        assert!(matches!(
            parse(r#"<object id="1" x="1" y="up"/>"#),
            Err(DocumentError::InvalidAttribute { attribute: "y", .. })
        ));
    }
}
