use super::Span;
use super::font::FontSet;
use super::style::{Align, Color, Emphasis, FontFace, LEADING_RATIO, VAlign};
use super::text::{self, TextLine};

/// Default horizontal and vertical cell padding, in points.
const DEFAULT_H_PADDING: f32 = 6.0;
const DEFAULT_V_PADDING: f32 = 3.0;
const DEFAULT_FONT_SIZE: f32 = 10.0;

/// One table cell: each span starts a new line within the cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub spans: Vec<Span>,
    /// Wrap long lines to the column width. Unwrapped text may overflow.
    pub wrap: bool,
}

impl Cell {
    pub fn empty() -> Self {
        Self {
            spans: Vec::new(),
            wrap: true,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::styled(text, Emphasis::Plain)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, Emphasis::Bold)
    }

    pub fn styled(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            spans: vec![Span::new(text, emphasis)],
            wrap: true,
        }
    }

    /// Add another line below the existing content.
    pub fn line(mut self, text: impl Into<String>, emphasis: Emphasis) -> Self {
        self.spans.push(Span::new(text, emphasis));
        self
    }

    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    /// Cell content with line breaks flattened to spaces.
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lay out the cell's lines for the given inner width.
    pub fn layout(&self, fonts: &FontSet, style: &CellStyle, inner_width: f32) -> Vec<TextLine> {
        let mut lines = Vec::new();
        for span in &self.spans {
            let face = style.face.with(span.emphasis);
            if self.wrap {
                let runs = [(face, span.text.as_str())];
                lines.extend(text::wrap_runs(fonts, &runs, style.size, inner_width));
            } else if let Some(line) = text::single_line(fonts, face, style.size, &span.text) {
                lines.push(line);
            }
        }
        lines
    }
}

/// Cell address with negative indices counted from the end, as in `(-1, -1)`
/// for the bottom-right cell.
pub type CellRef = (i32, i32);

/// A styling command applied to the rectangular region `from..=to`.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRule {
    pub from: CellRef,
    pub to: CellRef,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleKind {
    Background(Color),
    TextColor(Color),
    Align(Align),
    VAlign(VAlign),
    Face(FontFace),
    FontSize(f32),
    TopPadding(f32),
    BottomPadding(f32),
    /// Box every cell in the region.
    Grid { width: f32, color: Color },
    /// Rule along the top edge of every cell in the region.
    LineAbove { width: f32, color: Color },
}

/// Ordered styling commands; later rules override earlier ones.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableStyle {
    pub rules: Vec<StyleRule>,
}

impl TableStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, from: CellRef, to: CellRef, kind: RuleKind) -> Self {
        self.rules.push(StyleRule { from, to, kind });
        self
    }

    /// Apply `kind` to every cell.
    pub fn all(self, kind: RuleKind) -> Self {
        self.rule((0, 0), (-1, -1), kind)
    }
}

/// Fully resolved style of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Color,
    pub align: Align,
    pub valign: VAlign,
    pub background: Option<Color>,
    pub pad_top: f32,
    pub pad_bottom: f32,
    pub pad_left: f32,
    pub pad_right: f32,
}

impl CellStyle {
    pub fn leading(&self) -> f32 {
        self.size * LEADING_RATIO
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            face: FontFace::Regular,
            size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
            align: Align::Left,
            valign: VAlign::Top,
            background: None,
            pad_top: DEFAULT_V_PADDING,
            pad_bottom: DEFAULT_V_PADDING,
            pad_left: DEFAULT_H_PADDING,
            pad_right: DEFAULT_H_PADDING,
        }
    }
}

/// Stroke along one cell edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeStroke {
    pub width: f32,
    pub color: Color,
}

/// Strokes to draw around one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellEdges {
    pub top: Option<EdgeStroke>,
    pub bottom: Option<EdgeStroke>,
    pub left: Option<EdgeStroke>,
    pub right: Option<EdgeStroke>,
}

/// A grid of cells with fixed column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub col_widths: Vec<f32>,
    pub rows: Vec<Vec<Cell>>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(col_widths: Vec<f32>) -> Self {
        Self {
            col_widths,
            rows: Vec::new(),
            style: TableStyle::default(),
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    /// Append a row, padding or trimming it to the column count.
    pub fn push_row(&mut self, mut cells: Vec<Cell>) {
        cells.resize_with(self.col_widths.len(), Cell::empty);
        self.rows.push(cells);
    }

    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Plain text of every row, cells joined by `" | "`; empty cells are skipped.
    pub fn row_texts(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(Cell::plain_text)
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect()
    }

    fn covers(&self, rule: &StyleRule, col: usize, row: usize) -> bool {
        let cols = self.col_widths.len() as i32;
        let rows = self.rows.len() as i32;
        let norm = |i: i32, n: i32| if i < 0 { n + i } else { i };
        let (c0, r0) = (norm(rule.from.0, cols), norm(rule.from.1, rows));
        let (c1, r1) = (norm(rule.to.0, cols), norm(rule.to.1, rows));
        let (c, r) = (col as i32, row as i32);
        c >= c0 && c <= c1 && r >= r0 && r <= r1
    }

    /// Resolve all matching rules for one cell, in declaration order.
    pub fn cell_style(&self, col: usize, row: usize) -> CellStyle {
        let mut style = CellStyle::default();
        for rule in self.style.rules.iter().filter(|r| self.covers(r, col, row)) {
            match rule.kind {
                RuleKind::Background(c) => style.background = Some(c),
                RuleKind::TextColor(c) => style.color = c,
                RuleKind::Align(a) => style.align = a,
                RuleKind::VAlign(v) => style.valign = v,
                RuleKind::Face(f) => style.face = f,
                RuleKind::FontSize(s) => style.size = s,
                RuleKind::TopPadding(p) => style.pad_top = p,
                RuleKind::BottomPadding(p) => style.pad_bottom = p,
                RuleKind::Grid { .. } | RuleKind::LineAbove { .. } => {}
            }
        }
        style
    }

    /// Edge strokes for one cell from `Grid` and `LineAbove` rules.
    pub fn cell_edges(&self, col: usize, row: usize) -> CellEdges {
        let mut edges = CellEdges::default();
        for rule in self.style.rules.iter().filter(|r| self.covers(r, col, row)) {
            match rule.kind {
                RuleKind::Grid { width, color } => {
                    let stroke = Some(EdgeStroke { width, color });
                    edges = CellEdges {
                        top: stroke,
                        bottom: stroke,
                        left: stroke,
                        right: stroke,
                    };
                }
                RuleKind::LineAbove { width, color } => {
                    edges.top = Some(EdgeStroke { width, color });
                }
                _ => {}
            }
        }
        edges
    }
}
