//! Document assembly: fragments in, PDF bytes out.
//!
//! Two stages: [`paginate`] flows fragments onto fixed-size pages as
//! drawing operations, and [`write_pdf`] serialises those pages with
//! `lopdf`. Both stages measure and draw with the same embedded faces.
//! Output is built in memory so a failure never leaves a partially written
//! file behind.

mod flow;
mod pdf;

use serde::{Deserialize, Serialize};

pub use flow::{DrawOp, PageContent, paginate};
pub use pdf::write_pdf;

use crate::core::DocumentError;
use crate::layout::{FontSet, Fragment, INCH};

/// A4 width in points.
pub const A4_WIDTH: f32 = 595.2756;
/// A4 height in points.
pub const A4_HEIGHT: f32 = 841.8898;

/// Page size and margins, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
}

impl PageConfig {
    /// A4 portrait with half-inch margins on every side.
    pub fn a4() -> Self {
        let margin = 0.5 * INCH;
        Self {
            width: A4_WIDTH,
            height: A4_HEIGHT,
            margin_top: margin,
            margin_right: margin,
            margin_bottom: margin,
            margin_left: margin,
        }
    }

    pub fn frame_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn frame_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::a4()
    }
}

/// Values for the PDF Info dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    pub producer: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>, creator: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            creator: creator.into(),
            producer: concat!("bijak ", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Lay out `fragments` and serialise the result as a PDF.
pub fn render_pdf(
    fragments: &[Fragment],
    config: &PageConfig,
    info: &DocumentInfo,
) -> Result<Vec<u8>, DocumentError> {
    if config.frame_width() <= 0.0 || config.frame_height() <= 0.0 {
        return Err(DocumentError::Render(format!(
            "page {}x{} leaves no room inside its margins",
            config.width, config.height
        )));
    }
    let fonts = FontSet::embedded()?;
    let pages = paginate(fragments, config, &fonts);
    write_pdf(&pages, config, info, &fonts)
}
