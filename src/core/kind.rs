use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DocumentError;

/// The two document templates this crate knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A priced offer to a customer, possibly revised in versions.
    Quotation,
    /// A GST tax invoice, optionally with a paid amount and balance due.
    Invoice,
}

impl DocumentKind {
    /// The literal selector tag (`"quotation"` / `"invoice"`).
    pub fn tag(self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation",
            DocumentKind::Invoice => "invoice",
        }
    }

    /// Capitalised name used in user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            DocumentKind::Quotation => "Quotation",
            DocumentKind::Invoice => "Invoice",
        }
    }

    /// The record field holding this document's identifying number.
    pub fn number_field(self) -> &'static str {
        match self {
            DocumentKind::Quotation => "quotation_number",
            DocumentKind::Invoice => "invoice_number",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DocumentKind {
    type Err = DocumentError;

    /// Parses the exact lowercase tag. Anything else is an unknown type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quotation" => Ok(DocumentKind::Quotation),
            "invoice" => Ok(DocumentKind::Invoice),
            other => Err(DocumentError::UnknownDocumentType(other.to_string())),
        }
    }
}
