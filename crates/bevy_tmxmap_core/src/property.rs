//! Custom properties attached to maps, layers, objects, tilesets and tiles.

use std::ops::Deref;

use roxmltree::Node;

use crate::error::DocumentError;
use crate::xml;

/// A single custom property.
///
/// Values are kept as text exactly as written in the document. `property_type` carries
/// Tiled's declared type (`string`, `int`, `float`, `bool`, `color`, `file`, ...) so
/// callers can coerce as they see fit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Property {
    pub name: String,
    pub property_type: Option<String>,
    pub value: String,
}

/// Ordered list of properties, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties(Vec<Property>);

impl Properties {
    /// First property named `name`.
    pub fn find(&self, name: &str) -> Option<&Property> {
        self.0.iter().find(|property| property.name == name)
    }

    /// Value of the first property named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name).map(|property| property.value.as_str())
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Property> {
        self.0.iter_mut()
    }

    pub fn into_vec(self) -> Vec<Property> {
        self.0
    }
}

impl Deref for Properties {
    type Target = [Property];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Property>> for Properties {
    fn from(properties: Vec<Property>) -> Self {
        Self(properties)
    }
}

impl FromIterator<Property> for Properties {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collect the `properties/property` children of `node`.
pub(crate) fn parse_properties(node: Node<'_, '_>) -> Result<Properties, DocumentError> {
    xml::select(node, "properties", "property")
        .map(parse_property)
        .collect()
}

fn parse_property(node: Node<'_, '_>) -> Result<Property, DocumentError> {
    let name = xml::attr(node, "name")?.to_owned();
    let property_type = xml::attr_owned(node, "type");
    // Multi-line string properties store their value as element text.
    let value = xml::attr_owned(node, "value").unwrap_or_else(|| xml::inner_text(node));

    Ok(Property {
        name,
        property_type,
        value,
    })
}

#[cfg(test)]
mod tests {
    use roxmltree::Document;

    use super::*;

    fn parse(text: &str) -> Result<Properties, DocumentError> {
        let document = Document::parse(text).unwrap();
        parse_properties(document.root_element())
    }

    #[test]
    fn test_properties_keep_order_and_type() {
        let properties = parse(
            r#"<map>
                <properties>
                    <property name="gravity" type="float" value="9.8"/>
                    <property name="title" value="Cave"/>
                    <property name="locked" type="bool" value="true"/>
                </properties>
            </map>"#,
        )
        .unwrap();

        let names: Vec<_> = properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["gravity", "title", "locked"]);
        assert_eq!(
            properties.find("gravity"),
            Some(&Property {
                name: "gravity".into(),
                property_type: Some("float".into()),
                value: "9.8".into(),
            })
        );
        assert_eq!(properties.find("title").unwrap().property_type, None);
        assert_eq!(properties.get("locked"), Some("true"));
        assert_eq!(properties.get("missing"), None);

        let owned = properties.into_vec();
        assert_eq!(owned.len(), 3);
        assert_eq!(owned[2].value, "true");
    }

    #[test]
    fn test_value_falls_back_to_text() {
        let properties = parse(
            r#"<map><properties><property name="dialog">line one
line two</property></properties></map>"#,
        )
        .unwrap();
        assert_eq!(properties.get("dialog"), Some("line one\nline two"));
    }

    #[test]
    fn test_value_attribute_wins_over_text() {
        let properties =
            parse(r#"<map><properties><property name="a" value="attr">text</property></properties></map>"#)
                .unwrap();
        assert_eq!(properties.get("a"), Some("attr"));
    }

    #[test]
    fn test_missing_name_is_fatal() {
        let error = parse(r#"<map><properties><property value="1"/></properties></map>"#)
            .unwrap_err();
        assert!(matches!(
            error,
            DocumentError::MissingAttribute { attribute: "name", .. }
        ));
    }

    #[test]
    fn test_no_properties_is_empty() {
        assert!(parse("<map/>").unwrap().is_empty());
    }
}
