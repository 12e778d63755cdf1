// Errors raised while loading shape definition documents

use crate::engine::assets::AssetError;

/// Everything that can go wrong while loading a shape document
///
/// A failed load never leaves partially installed bodies behind.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("{path} is not valid UTF-8")]
    NotUtf8 { path: String },

    #[error("Malformed XML at byte {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Malformed document: {0}")]
    Malformed(String),

    #[error("<{element}> is missing attribute \"{name}\"")]
    MissingAttribute { element: String, name: String },

    #[error("<{element}> has no attribute or child element \"{name}\"")]
    MissingElement { element: String, name: String },

    #[error("Invalid number {value:?} for \"{name}\" in <{element}>")]
    InvalidNumber {
        element: String,
        name: String,
        value: String,
    },

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Unsupported shape format version {0}")]
    UnsupportedFormat(i32),

    #[error("Shape file already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Body \"{name}\" in {path} is already defined by another file")]
    DuplicateBody { name: String, path: String },
}
