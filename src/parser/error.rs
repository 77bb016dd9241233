use thiserror::Error;

/// Raised when a source cannot be decoded into records.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("source is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("missing element <{0}>")]
    MissingElement(&'static str),
    #[error("missing attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("missing field '{0}'")]
    MissingField(&'static str),
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("invalid timestamp {value:?}")]
    InvalidTimestamp { value: String },
    #[error("invalid raster: {0}")]
    InvalidRaster(String),
    #[error("unsupported source: {0}")]
    UnsupportedSource(&'static str),
}

impl ParseError {
    pub(crate) fn number(field: &'static str, value: &str) -> Self {
        ParseError::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn timestamp(value: &str) -> Self {
        ParseError::InvalidTimestamp {
            value: value.to_string(),
        }
    }
}
