//! Flowing fragments onto fixed-size pages.
//!
//! Coordinates here are top-down points from the top-left page corner; the
//! PDF writer flips them. Content never gets clipped: tables break between
//! rows, and a paragraph or row taller than the frame continues on the next
//! page line by line.

use log::trace;

use super::PageConfig;
use crate::layout::{
    Align, CellEdges, CellStyle, Color, FontFace, FontSet, Fragment, Paragraph, Table, VAlign,
    text, text::TextLine,
};

const EPSILON: f32 = 0.01;

/// A single drawing primitive on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
        color: Color,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
}

/// Drawing operations of one page, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub ops: Vec<DrawOp>,
}

impl PageContent {
    /// All text drawn on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Lay out `fragments` in order onto as many pages as needed.
///
/// Always returns at least one page.
pub fn paginate(fragments: &[Fragment], page: &PageConfig, fonts: &FontSet) -> Vec<PageContent> {
    let mut flow = Flow::new(page, fonts);
    for fragment in fragments {
        match fragment {
            Fragment::Paragraph(p) => flow.paragraph(p),
            Fragment::Spacer(h) => flow.spacer(*h),
            Fragment::Table(t) => flow.table(t),
        }
    }
    flow.finish()
}

struct LaidOutCell {
    style: CellStyle,
    lines: Vec<TextLine>,
    edges: CellEdges,
}

struct Flow<'a> {
    page: &'a PageConfig,
    fonts: &'a FontSet,
    pages: Vec<PageContent>,
    current: PageContent,
    y: f32,
}

impl<'a> Flow<'a> {
    fn new(page: &'a PageConfig, fonts: &'a FontSet) -> Self {
        Self {
            page,
            fonts,
            pages: Vec::new(),
            current: PageContent::default(),
            y: page.margin_top,
        }
    }

    fn top(&self) -> f32 {
        self.page.margin_top
    }

    fn bottom(&self) -> f32 {
        self.page.height - self.page.margin_bottom
    }

    fn at_top(&self) -> bool {
        self.y <= self.top() + EPSILON
    }

    fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom() + EPSILON
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = self.top();
        trace!("page break, starting page {}", self.pages.len() + 1);
    }

    fn finish(mut self) -> Vec<PageContent> {
        self.pages.push(self.current);
        self.pages
    }

    fn spacer(&mut self, height: f32) {
        if self.at_top() {
            return;
        }
        if self.fits(height) {
            self.y += height;
        } else {
            self.new_page();
        }
    }

    fn paragraph(&mut self, p: &Paragraph) {
        let style = &p.style;
        let runs = text::runs(
            style.face,
            p.spans.iter().map(|s| (s.emphasis, s.text.as_str())),
        );
        let lines = text::wrap_runs(self.fonts, &runs, style.size, self.page.frame_width());

        if !self.at_top() && style.space_before > 0.0 {
            if self.fits(style.space_before) {
                self.y += style.space_before;
            } else {
                self.new_page();
            }
        }

        for line in &lines {
            if !self.at_top() && !self.fits(style.leading) {
                self.new_page();
            }
            let x = self.page.margin_left
                + align_offset(style.align, self.page.frame_width(), line.width);
            self.draw_line(line, x, self.y, style.leading, style.size, style.color);
            self.y += style.leading;
        }

        if style.space_after > 0.0 {
            if self.fits(style.space_after) {
                self.y += style.space_after;
            } else {
                self.new_page();
            }
        }
    }

    fn table(&mut self, table: &Table) {
        let frame_width = self.page.frame_width();
        let x0 = self.page.margin_left + ((frame_width - table.width()) / 2.0).max(0.0);
        let col_x: Vec<f32> = table
            .col_widths
            .iter()
            .scan(x0, |x, w| {
                let start = *x;
                *x += w;
                Some(start)
            })
            .collect();

        for (row_idx, row) in table.rows.iter().enumerate() {
            let cells: Vec<LaidOutCell> = row
                .iter()
                .enumerate()
                .map(|(col, cell)| {
                    let style = table.cell_style(col, row_idx);
                    let inner = table.col_widths[col] - style.pad_left - style.pad_right;
                    LaidOutCell {
                        style,
                        lines: cell.layout(self.fonts, &style, inner.max(1.0)),
                        edges: table.cell_edges(col, row_idx),
                    }
                })
                .collect();

            let ranges: Vec<(usize, usize)> = cells.iter().map(|c| (0, c.lines.len())).collect();
            let row_height = segment_height(&cells, &ranges);

            if !self.at_top() && !self.fits(row_height) {
                self.new_page();
            }

            if self.fits(row_height) {
                self.draw_row(table, &col_x, &cells, &ranges, row_height);
                self.y += row_height;
            } else {
                self.split_row(table, &col_x, &cells);
            }
        }
    }

    /// Draw a row taller than the frame in page-sized slices.
    fn split_row(&mut self, table: &Table, col_x: &[f32], cells: &[LaidOutCell]) {
        let frame_height = self.page.frame_height();
        let capacity: Vec<usize> = cells
            .iter()
            .map(|c| {
                let room = frame_height - c.style.pad_top - c.style.pad_bottom;
                ((room / c.style.leading()).floor() as usize).max(1)
            })
            .collect();
        let mut offsets = vec![0usize; cells.len()];

        loop {
            if !self.at_top() {
                self.new_page();
            }
            let ranges: Vec<(usize, usize)> = cells
                .iter()
                .zip(&offsets)
                .zip(&capacity)
                .map(|((c, &start), &cap)| {
                    let start = start.min(c.lines.len());
                    (start, (start + cap).min(c.lines.len()))
                })
                .collect();
            let height = segment_height(cells, &ranges).min(frame_height);
            self.draw_row(table, col_x, cells, &ranges, height);
            self.y += height;

            for (offset, (_, end)) in offsets.iter_mut().zip(&ranges) {
                *offset = *end;
            }
            if cells.iter().zip(&offsets).all(|(c, &o)| o >= c.lines.len()) {
                break;
            }
        }
    }

    fn draw_row(
        &mut self,
        table: &Table,
        col_x: &[f32],
        cells: &[LaidOutCell],
        ranges: &[(usize, usize)],
        height: f32,
    ) {
        let top = self.y;

        for (col, cell) in cells.iter().enumerate() {
            if let Some(color) = cell.style.background {
                self.current.ops.push(DrawOp::FillRect {
                    x: col_x[col],
                    y: top,
                    width: table.col_widths[col],
                    height,
                    color,
                });
            }
        }

        for (col, (cell, &(start, end))) in cells.iter().zip(ranges).enumerate() {
            let style = &cell.style;
            let width = table.col_widths[col];
            let leading = style.leading();
            let content = (end - start) as f32 * leading;
            let mut y = match style.valign {
                VAlign::Top => top + style.pad_top,
                VAlign::Middle => top + (height - content) / 2.0,
                VAlign::Bottom => top + height - style.pad_bottom - content,
            };
            for line in &cell.lines[start..end] {
                let x = match style.align {
                    Align::Left => col_x[col] + style.pad_left,
                    Align::Right => col_x[col] + width - style.pad_right - line.width,
                    Align::Center => col_x[col] + (width - line.width) / 2.0,
                };
                self.draw_line(line, x, y, leading, style.size, style.color);
                y += leading;
            }
        }

        for (col, cell) in cells.iter().enumerate() {
            let (left, right) = (col_x[col], col_x[col] + table.col_widths[col]);
            let bottom = top + height;
            let edges = &cell.edges;
            let segments = [
                (edges.top, (left, top, right, top)),
                (edges.bottom, (left, bottom, right, bottom)),
                (edges.left, (left, top, left, bottom)),
                (edges.right, (right, top, right, bottom)),
            ];
            for (stroke, (x1, y1, x2, y2)) in segments {
                if let Some(stroke) = stroke {
                    self.current.ops.push(DrawOp::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        width: stroke.width,
                        color: stroke.color,
                    });
                }
            }
        }
    }

    fn draw_line(
        &mut self,
        line: &TextLine,
        x: f32,
        top: f32,
        leading: f32,
        size: f32,
        color: Color,
    ) {
        let baseline = top + (leading - size) / 2.0 + size * 0.8;
        let mut cursor = x;
        for piece in &line.pieces {
            let width = self.fonts.text_width(piece.face, size, &piece.text);
            self.current.ops.push(DrawOp::Text {
                x: cursor,
                baseline,
                face: piece.face,
                size,
                color,
                text: piece.text.clone(),
            });
            cursor += width;
        }
    }
}

fn align_offset(align: Align, available: f32, used: f32) -> f32 {
    match align {
        Align::Left => 0.0,
        Align::Center => (available - used) / 2.0,
        Align::Right => available - used,
    }
}

/// Height of a row slice: tallest cell including padding, at least one line.
fn segment_height(cells: &[LaidOutCell], ranges: &[(usize, usize)]) -> f32 {
    cells
        .iter()
        .zip(ranges)
        .map(|(c, &(start, end))| {
            let lines = (end - start).max(1) as f32;
            c.style.pad_top + lines * c.style.leading() + c.style.pad_bottom
        })
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Cell, ParagraphStyle, RuleKind, TableStyle};

    fn fonts() -> FontSet {
        FontSet::embedded().unwrap()
    }

    fn all_text(pages: &[PageContent]) -> Vec<String> {
        pages
            .iter()
            .flat_map(|p| p.texts().map(str::to_string).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn empty_flow_has_one_page() {
        let pages = paginate(&[], &PageConfig::a4(), &fonts());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());
    }

    #[test]
    fn long_table_breaks_between_rows() {
        let mut table = Table::new(vec![200.0, 100.0]);
        for i in 0..150 {
            table.push_row(vec![Cell::text(format!("row-{i}")), Cell::text("x")]);
        }
        let pages = paginate(&[Fragment::Table(table)], &PageConfig::a4(), &fonts());
        assert!(pages.len() > 1);
        let text = all_text(&pages);
        for i in 0..150 {
            assert!(text.contains(&format!("row-{i}")), "row-{i} missing");
        }
    }

    #[test]
    fn oversized_row_is_split_not_truncated() {
        let body: Vec<String> = (0..400).map(|i| format!("w{i}")).collect();
        let mut table = Table::new(vec![60.0]);
        table.push_row(vec![Cell::text(body.join(" "))]);
        let pages = paginate(&[Fragment::Table(table)], &PageConfig::a4(), &fonts());
        assert!(pages.len() > 1);
        let joined = all_text(&pages).join(" ");
        for w in &body {
            assert!(joined.split(' ').any(|t| t == w), "{w} missing");
        }
    }

    #[test]
    fn long_paragraph_continues_on_next_page() {
        let text = "lorem ipsum dolor ".repeat(800);
        let pages = paginate(
            &[Fragment::Paragraph(Paragraph::new(text, ParagraphStyle::normal()))],
            &PageConfig::a4(),
            &fonts(),
        );
        assert!(pages.len() > 1);
        let config = PageConfig::a4();
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { baseline, .. } = op {
                    assert!(*baseline <= config.height - config.margin_bottom);
                    assert!(*baseline >= config.margin_top);
                }
            }
        }
    }

    #[test]
    fn spacer_is_dropped_at_page_top() {
        let frags = [
            Fragment::Spacer(100.0),
            Fragment::Paragraph(Paragraph::new("first", ParagraphStyle::normal())),
        ];
        let pages = paginate(&frags, &PageConfig::a4(), &fonts());
        let DrawOp::Text { baseline, .. } = &pages[0].ops[0] else {
            panic!("expected text");
        };
        assert!(*baseline < PageConfig::a4().margin_top + 20.0);
    }

    #[test]
    fn right_aligned_cell_ends_at_padding() {
        let mut table = Table::new(vec![100.0]).with_style(
            TableStyle::new().all(RuleKind::Align(Align::Right)),
        );
        table.push_row(vec![Cell::text("99")]);
        let config = PageConfig::a4();
        let fonts = fonts();
        let pages = paginate(&[Fragment::Table(table)], &config, &fonts);
        let DrawOp::Text { x, size, face, text, .. } = &pages[0].ops[0] else {
            panic!("expected text");
        };
        let x0 = config.margin_left + (config.frame_width() - 100.0) / 2.0;
        let end = x + fonts.text_width(*face, *size, text);
        assert!((end - (x0 + 100.0 - 6.0)).abs() < 0.01);
    }

    #[test]
    fn grid_draws_four_edges_per_cell() {
        let mut table = Table::new(vec![50.0, 50.0]).with_style(TableStyle::new().all(
            RuleKind::Grid {
                width: 0.5,
                color: Color::GREY,
            },
        ));
        table.push_row(vec![Cell::text("a"), Cell::text("b")]);
        let pages = paginate(&[Fragment::Table(table)], &PageConfig::a4(), &fonts());
        let lines = pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count();
        assert_eq!(lines, 8);
    }
}
