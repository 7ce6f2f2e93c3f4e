use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a billing record or producing its PDF.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// The document type selector is neither `quotation` nor `invoice`.
    #[error("unknown document type: {0}")]
    UnknownDocumentType(String),

    /// The input file could not be read.
    #[error("failed to read input {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file is not valid JSON.
    #[error("failed to parse input {}: {source}", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The input is valid JSON but not an object.
    #[error("input must be a JSON object, found {0}")]
    InputShape(&'static str),

    /// Layout or PDF serialisation failed.
    #[error("render error: {0}")]
    Render(String),

    /// The output file could not be written.
    #[error("failed to write output {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<lopdf::Error> for DocumentError {
    fn from(e: lopdf::Error) -> Self {
        DocumentError::Render(e.to_string())
    }
}
