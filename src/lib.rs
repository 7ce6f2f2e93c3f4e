//! # bijak
//!
//! Quotation and GST tax-invoice PDFs from JSON billing records.
//!
//! A record is a loosely typed JSON object: every field is optional, and
//! missing values fall back to `N/A` or `₹0.00`. All amounts are
//! precomputed upstream; this crate formats them but never does tax
//! arithmetic. Record amounts are read as `f64` and rounded to paise;
//! exact amounts can be formatted with [`format_decimal`].
//!
//! ## Quick Start
//!
//! ```rust
//! use bijak::{DocumentKind, DocumentRecord, RenderOptions, RenderedDocument};
//! use serde_json::json;
//!
//! let record = DocumentRecord::from_value(json!({
//!     "quotation_number": "Q-100",
//!     "customer_name": "Acme",
//!     "items": [{"item_name": "Chair", "quantity": 2, "unit_price": 1500, "amount": 3000}],
//!     "total_amount": 3540
//! }))
//! .unwrap();
//!
//! let doc = RenderedDocument::compose(DocumentKind::Quotation, &record, &RenderOptions::default());
//! assert!(doc.text_lines().contains(&"QUOTATION: Q-100".to_string()));
//!
//! let pdf = bijak::render(DocumentKind::Quotation, &record, &RenderOptions::default()).unwrap();
//! assert!(pdf.starts_with(b"%PDF"));
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`core`] | Record model, currency formatting, document kinds, errors |
//! | [`layout`] | Paragraphs, tables, and spacers; font metrics and wrapping |
//! | [`template`] | Quotation and invoice layouts |
//! | [`render`] | Pagination and PDF serialisation |

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

pub mod core;
mod document;
pub mod layout;
mod options;
pub mod render;
pub mod template;

pub use crate::core::*;
pub use document::RenderedDocument;
pub use options::{DEFAULT_COMPANY_NAME, RenderOptions};

/// Render `record` as a PDF of the given kind.
pub fn render(
    kind: DocumentKind,
    record: &DocumentRecord,
    options: &RenderOptions,
) -> Result<Vec<u8>, DocumentError> {
    RenderedDocument::compose(kind, record, options).to_pdf(&options.page)
}

/// Like [`render`], with the kind given as its selector tag.
///
/// Anything other than `quotation` or `invoice` (exact, lowercase) is
/// [`DocumentError::UnknownDocumentType`].
pub fn render_str(
    doc_type: &str,
    record: &DocumentRecord,
    options: &RenderOptions,
) -> Result<Vec<u8>, DocumentError> {
    render(doc_type.parse()?, record, options)
}

/// Read and parse a JSON record from disk.
pub fn load_record(path: impl AsRef<Path>) -> Result<DocumentRecord, DocumentError> {
    let path = path.as_ref();
    let raw = fs::read(path).map_err(|source| DocumentError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|source| DocumentError::InputParse {
            path: path.to_path_buf(),
            source,
        })?;
    DocumentRecord::from_value(value)
}

/// Load `input`, render it, and write the PDF to `output`.
///
/// The type is checked before any file is touched, and `output` is only
/// written once rendering has succeeded.
pub fn generate(
    doc_type: &str,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<PathBuf, DocumentError> {
    let kind: DocumentKind = doc_type.parse()?;
    let input = input.as_ref();
    let output = output.as_ref();

    debug!("loading {kind} record from {}", input.display());
    let record = load_record(input)?;
    let bytes = render(kind, &record, options)?;

    fs::write(output, &bytes).map_err(|source| DocumentError::OutputWrite {
        path: output.to_path_buf(),
        source,
    })?;
    info!("wrote {} bytes to {}", bytes.len(), output.display());
    Ok(output.to_path_buf())
}
