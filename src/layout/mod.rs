//! Page-independent layout fragments.
//!
//! Section builders produce a flat sequence of [`Fragment`]s; the renderer
//! flows them onto pages. Fragments carry text exactly as it should read
//! (including `₹`); glyphs are chosen only when text is measured or written.

pub mod font;
mod style;
mod table;
pub mod text;

pub use font::FontSet;
pub use style::*;
pub use table::*;

/// A run of text with inline emphasis.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub emphasis: Emphasis,
}

impl Span {
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Plain)
    }
}

/// A block of flowing text; its spans are set inline and word-wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new(text: impl Into<String>, style: ParagraphStyle) -> Self {
        Self {
            spans: vec![Span::plain(text)],
            style,
        }
    }

    pub fn from_spans(spans: Vec<Span>, style: ParagraphStyle) -> Self {
        Self { spans, style }
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One element of the document flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Paragraph(Paragraph),
    /// Vertical gap in points; dropped at the top of a page.
    Spacer(f32),
    Table(Table),
}

impl Fragment {
    pub fn spacer_inches(inches: f32) -> Self {
        Fragment::Spacer(inches * INCH)
    }

    /// Text lines of the fragment: one per paragraph, one per table row.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            Fragment::Paragraph(p) => vec![p.plain_text()],
            Fragment::Spacer(_) => Vec::new(),
            Fragment::Table(t) => t.row_texts(),
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Fragment::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Fragment::Paragraph(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Paragraph> for Fragment {
    fn from(p: Paragraph) -> Self {
        Fragment::Paragraph(p)
    }
}

impl From<Table> for Fragment {
    fn from(t: Table) -> Self {
        Fragment::Table(t)
    }
}
