//! Thin helpers over `roxmltree` nodes: attribute lookup and child selection.

use std::str::FromStr;

use roxmltree::{Document, Node};

use crate::error::DocumentError;

pub(crate) fn parse_document(text: &str) -> Result<Document<'_>, DocumentError> {
    Ok(Document::parse(text)?)
}

/// Root element of `document`, which must be named `expected`.
pub(crate) fn root<'a, 'input>(
    document: &'a Document<'input>,
    expected: &'static str,
) -> Result<Node<'a, 'input>, DocumentError> {
    let root = document.root_element();
    if root.has_tag_name(expected) {
        Ok(root)
    } else {
        Err(DocumentError::UnexpectedRoot {
            expected,
            found: root.tag_name().name().to_owned(),
        })
    }
}

fn element_name(node: Node<'_, '_>) -> String {
    node.tag_name().name().to_owned()
}

/// Required attribute as raw text.
pub(crate) fn attr<'a>(node: Node<'a, '_>, name: &'static str) -> Result<&'a str, DocumentError> {
    node.attribute(name)
        .ok_or_else(|| DocumentError::MissingAttribute {
            element: element_name(node),
            attribute: name,
        })
}

/// Optional attribute as owned text.
pub(crate) fn attr_owned(node: Node<'_, '_>, name: &'static str) -> Option<String> {
    node.attribute(name).map(str::to_owned)
}

fn parse_value<T: FromStr>(
    node: Node<'_, '_>,
    name: &'static str,
    value: &str,
) -> Result<T, DocumentError> {
    value
        .trim()
        .parse()
        .map_err(|_| DocumentError::InvalidAttribute {
            element: element_name(node),
            attribute: name,
            value: value.to_owned(),
        })
}

/// Required attribute parsed as `T`.
pub(crate) fn parse_attr<T: FromStr>(
    node: Node<'_, '_>,
    name: &'static str,
) -> Result<T, DocumentError> {
    parse_value(node, name, attr(node, name)?)
}

/// Optional attribute parsed as `T`; `default` when absent, an error when unparsable.
pub(crate) fn parse_attr_or<T: FromStr>(
    node: Node<'_, '_>,
    name: &'static str,
    default: T,
) -> Result<T, DocumentError> {
    match node.attribute(name) {
        None => Ok(default),
        Some(value) => parse_value(node, name, value),
    }
}

/// Optional attribute parsed as `T`; `default` when absent or unparsable.
pub(crate) fn parse_attr_lenient<T: FromStr>(node: Node<'_, '_>, name: &str, default: T) -> T {
    node.attribute(name)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

/// First direct child named `name`.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(name))
}

/// First direct child named `name`, failing when there is none.
pub(crate) fn required_child<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> Result<Node<'a, 'input>, DocumentError> {
    child(node, name).ok_or_else(|| DocumentError::MissingElement {
        parent: element_name(node),
        element: name,
    })
}

/// All direct children named `name`, in document order.
pub(crate) fn children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| child.has_tag_name(name))
}

/// Grandchildren matching the path `container/name`, e.g. `properties/property`.
pub(crate) fn select<'a, 'input>(
    node: Node<'a, 'input>,
    container: &str,
    name: &str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    children(node, container).flat_map(move |parent| children(parent, name))
}

/// Concatenated text of every descendant text node.
pub(crate) fn inner_text(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_follows_container_path() {
        let document = Document::parse(
            r#"<tile><properties><property name="a"/><property name="b"/></properties><property name="stray"/></tile>"#,
        )
        .unwrap();
        let names: Vec<_> = select(document.root_element(), "properties", "property")
            .filter_map(|node| node.attribute("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_attr_variants() {
        let document = Document::parse(r#"<object id="7" width="abc"/>"#).unwrap();
        let node = document.root_element();

        assert_eq!(parse_attr::<u32>(node, "id").unwrap(), 7);
        assert!(matches!(
            parse_attr::<f32>(node, "x"),
            Err(DocumentError::MissingAttribute { attribute: "x", .. })
        ));
        assert!(matches!(
            parse_attr_or::<f32>(node, "width", 0.0),
            Err(DocumentError::InvalidAttribute { attribute: "width", .. })
        ));
        assert_eq!(parse_attr_lenient(node, "width", 0.0_f32), 0.0);
        assert_eq!(parse_attr_or(node, "height", 3_u32).unwrap(), 3);
    }

    #[test]
    fn test_unexpected_root() {
        let document = Document::parse("<tileset/>").unwrap();
        assert!(matches!(
            root(&document, "map"),
            Err(DocumentError::UnexpectedRoot { expected: "map", .. })
        ));
    }
}
