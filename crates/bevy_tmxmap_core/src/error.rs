//! Error types for TMX/TSX parsing and loading.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = TmxError> = std::result::Result<T, E>;

/// Error returned by every fallible parse or load operation.
///
/// Parsing is all-or-nothing: any of these aborts the whole document, no partially
/// populated model is ever returned. Lookups that simply find nothing (GID resolution,
/// source rectangles) return `None` instead of an error.
#[derive(Debug, Error)]
pub enum TmxError {
    /// The file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading from a caller-supplied stream failed.
    #[error("failed to read document stream: {0}")]
    Read(#[source] std::io::Error),

    /// The file does not carry the extension of the requested document kind.
    #[error("unsupported file format {}: expected a .{expected} file", path.display())]
    UnsupportedFormat {
        path: PathBuf,
        expected: &'static str,
    },

    /// The document is not well-formed XML, or a required attribute/element is absent
    /// or carries a value of the wrong type.
    #[error("unable to parse {document}: {source}")]
    Malformed {
        /// The failing document (`"map"`, `"tileset"` or its file path).
        document: String,
        #[source]
        source: DocumentError,
    },

    /// A tile layer stores its cells in an encoding other than `csv`.
    #[error(
        "unsupported encoding \"{encoding}\" in layer \"{layer}\" of {document}: only csv is supported"
    )]
    UnsupportedEncoding {
        document: String,
        layer: String,
        encoding: String,
    },
}

impl TmxError {
    /// Lift a document-level failure into a [`TmxError`] naming `document`.
    pub(crate) fn from_document(document: impl Into<String>, error: DocumentError) -> Self {
        let document = document.into();
        match error {
            DocumentError::UnsupportedEncoding { layer, encoding } => Self::UnsupportedEncoding {
                document,
                layer,
                encoding,
            },
            source => Self::Malformed { document, source },
        }
    }

    /// Rename the failing document, e.g. to the path it was loaded from.
    ///
    /// Errors that do not name a document are returned unchanged.
    #[must_use]
    pub fn in_document(self, name: impl Into<String>) -> Self {
        match self {
            Self::Malformed { source, .. } => Self::Malformed {
                document: name.into(),
                source,
            },
            Self::UnsupportedEncoding {
                layer, encoding, ..
            } => Self::UnsupportedEncoding {
                document: name.into(),
                layer,
                encoding,
            },
            other => other,
        }
    }
}

/// Detailed cause of a [`TmxError::Malformed`] failure.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML is not well-formed: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("<{element}> is missing required attribute \"{attribute}\"")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("<{element}> attribute \"{attribute}\" has invalid value \"{value}\"")]
    InvalidAttribute {
        element: String,
        attribute: &'static str,
        value: String,
    },

    #[error("<{parent}> is missing required child <{element}>")]
    MissingElement {
        parent: String,
        element: &'static str,
    },

    #[error("layer \"{layer}\" has invalid cell value \"{value}\" at index {index}")]
    InvalidCell {
        layer: String,
        index: usize,
        value: String,
    },

    #[error("tile {tile} has invalid terrain \"{value}\": expected 4 comma-separated slots")]
    InvalidTerrain { tile: u32, value: String },

    /// Surfaced to callers as [`TmxError::UnsupportedEncoding`].
    #[error("layer \"{layer}\" uses unsupported encoding \"{encoding}\"")]
    UnsupportedEncoding { layer: String, encoding: String },
}
