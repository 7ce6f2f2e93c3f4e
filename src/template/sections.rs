use log::debug;

use super::{DocumentTemplate, ItemColumn, PartyLine, TextSection, TotalsRow};
use crate::core::{DocumentRecord, LineItem};
use crate::layout::{
    Align, Cell, Color, Emphasis, FontFace, Fragment, INCH, Paragraph, ParagraphStyle, RuleKind,
    Span, Table, TableStyle, VAlign,
};

/// Width of each party-block column, in inches.
const PARTY_COLUMN_WIDTH: f32 = 3.5;

/// Company name, optional subtitle, and the gap below them.
pub fn header(template: &DocumentTemplate, company_name: &str) -> Vec<Fragment> {
    let mut out: Vec<Fragment> =
        vec![Paragraph::new(company_name, ParagraphStyle::title(template.accent)).into()];
    if let Some(subtitle) = template.subtitle {
        out.push(
            Paragraph::from_spans(
                vec![Span::new(subtitle, Emphasis::Bold)],
                ParagraphStyle::subtitle(),
            )
            .into(),
        );
    }
    out.push(Fragment::spacer_inches(template.header_gap));
    out
}

/// `QUOTATION: Q-100`, plus ` (Version n)` for revised quotations.
pub fn title_line(template: &DocumentTemplate, record: &DocumentRecord) -> Vec<Fragment> {
    let number = record.text_or_na(template.kind.number_field());
    let mut spans = vec![Span::plain(format!("{}: {number}", template.title_label))];
    if template.show_version && record.amount("version").is_some_and(|v| v > 1.0) {
        spans.push(Span::new(
            format!(" (Version {})", record.text("version", "")),
            Emphasis::Italic,
        ));
    }
    vec![
        Paragraph::from_spans(spans, ParagraphStyle::heading()).into(),
        Fragment::spacer_inches(0.1),
    ]
}

fn party_line_cell(
    template: &DocumentTemplate,
    record: &DocumentRecord,
    line: PartyLine,
) -> Option<Cell> {
    match line {
        PartyLine::Customer => Some(Cell::bold(record.text_or_na("customer_name"))),
        PartyLine::ContactPerson => record.present_text("contact_person").map(Cell::text),
        PartyLine::Email => record.present_text("email").map(Cell::text),
        PartyLine::Phone => record.present_text("phone").map(Cell::text),
        PartyLine::Address => record.composed_address().map(Cell::text),
        PartyLine::Gstin => record.present_text("gstin").map(|gstin| {
            let emphasis = if template.bold_gstin {
                Emphasis::Bold
            } else {
                Emphasis::Plain
            };
            Cell::styled(format!("GSTIN: {gstin}"), emphasis)
        }),
    }
}

/// Two-column block: customer lines on the left, document details on the right.
///
/// One row per populated line; absent optional lines produce no row at all.
pub fn party_block(template: &DocumentTemplate, record: &DocumentRecord) -> Table {
    let width = PARTY_COLUMN_WIDTH * INCH;
    let mut table = Table::new(vec![width, width]).with_style(
        TableStyle::new()
            .all(RuleKind::VAlign(VAlign::Top))
            .all(RuleKind::TopPadding(6.0))
            .all(RuleKind::BottomPadding(6.0)),
    );
    table.push_row(vec![
        Cell::bold("BILL TO:"),
        Cell::bold(template.details_heading),
    ]);

    for line in PartyLine::ORDER {
        let Some(left) = party_line_cell(template, record, line) else {
            continue;
        };
        let right = template
            .details
            .iter()
            .find(|d| d.beside == line)
            .map(|d| Cell::text(format!("{}: {}", d.label, record.text_or_na(d.field))))
            .unwrap_or_else(Cell::empty);
        table.push_row(vec![left, right]);
    }
    table
}

fn item_cell(
    template: &DocumentTemplate,
    column: ItemColumn,
    serial: usize,
    item: &LineItem<'_>,
) -> Cell {
    match column {
        ItemColumn::Serial => Cell::text(serial.to_string()),
        ItemColumn::Name => Cell::text(item.item_name()),
        ItemColumn::Description => Cell::text(item.description(template.description_limit)),
        ItemColumn::NameWithDescription => {
            let cell = Cell::text(item.item_name());
            let description = item.description(template.description_limit);
            if description.is_empty() {
                cell
            } else {
                cell.line(description, Emphasis::Italic)
            }
        }
        ItemColumn::Hsn(code) => Cell::text(code),
        ItemColumn::Quantity => Cell::text(item.quantity()),
        ItemColumn::QuantityWithUnits => Cell::text(item.quantity_with_units()),
        ItemColumn::UnitPrice => Cell::text(item.unit_price()),
        ItemColumn::Amount => Cell::text(item.amount()),
    }
}

fn column_widths(template: &DocumentTemplate) -> Vec<f32> {
    template.item_columns.iter().map(|c| c.width * INCH).collect()
}

/// Header row plus one row per line item, on a grey grid.
pub fn items_table(template: &DocumentTemplate, record: &DocumentRecord) -> Table {
    let mut style = TableStyle::new()
        .rule((0, 0), (-1, 0), RuleKind::Background(Color::HEADER_FILL))
        .rule((0, 0), (-1, 0), RuleKind::TextColor(Color::SLATE));
    for (i, spec) in template.item_columns.iter().enumerate() {
        let col = i as i32;
        style = style.rule((col, 0), (col, -1), RuleKind::Align(spec.align));
    }
    let style = style
        .rule((0, 0), (-1, 0), RuleKind::Face(FontFace::Bold))
        .all(RuleKind::FontSize(9.0))
        .all(RuleKind::TopPadding(8.0))
        .all(RuleKind::BottomPadding(8.0))
        .all(RuleKind::Grid {
            width: 0.5,
            color: Color::GREY,
        })
        .all(RuleKind::VAlign(VAlign::Top));

    let mut table = Table::new(column_widths(template)).with_style(style);
    table.push_row(
        template
            .item_columns
            .iter()
            .map(|c| Cell::text(c.header))
            .collect(),
    );

    let items = record.items();
    debug!("laying out {} line item(s)", items.len());
    for (idx, item) in items.iter().enumerate() {
        table.push_row(
            template
                .item_columns
                .iter()
                .map(|c| item_cell(template, c.column, idx + 1, item))
                .collect(),
        );
    }
    table
}

/// Label/amount rows aligned under the last two item columns.
pub fn totals_block(template: &DocumentTemplate, record: &DocumentRecord) -> Table {
    let widths = column_widths(template);
    let cols = widths.len();
    let label_col = cols.saturating_sub(2);

    let row = |label: Cell, amount: Cell| -> Vec<Cell> {
        let mut cells: Vec<Cell> = (0..cols).map(|_| Cell::empty()).collect();
        if cols >= 2 {
            cells[label_col] = label.no_wrap();
            cells[cols - 1] = amount.no_wrap();
        }
        cells
    };

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for totals_row in template.totals {
        match *totals_row {
            TotalsRow::Amount { label, field } => {
                rows.push(row(Cell::text(label), Cell::text(record.currency(field))));
            }
            TotalsRow::Blank => rows.push(row(Cell::empty(), Cell::empty())),
            TotalsRow::GrandTotal { label, field } => {
                rows.push(row(Cell::bold(label), Cell::bold(record.currency(field))));
            }
            TotalsRow::Payment {
                paid_label,
                paid_field,
                balance_label,
                balance_field,
            } => {
                if record.amount(paid_field).is_some_and(|paid| paid > 0.0) {
                    rows.push(row(Cell::text(paid_label), Cell::text(record.currency(paid_field))));
                    rows.push(row(
                        Cell::bold(balance_label),
                        Cell::bold(record.currency(balance_field)),
                    ));
                }
            }
        }
    }

    let label_ref = label_col as i32;
    // The rule sits above the last row: the grand total, or the balance due
    // when payment rows follow it.
    let style = TableStyle::new()
        .rule((label_ref, 0), (-1, -1), RuleKind::Align(Align::Right))
        .all(RuleKind::FontSize(9.0))
        .all(RuleKind::TopPadding(4.0))
        .all(RuleKind::BottomPadding(4.0))
        .rule(
            (label_ref, -1),
            (-1, -1),
            RuleKind::LineAbove {
                width: 2.0,
                color: Color::SLATE,
            },
        );

    let mut table = Table::new(widths).with_style(style);
    for cells in rows {
        table.push_row(cells);
    }
    table
}

/// Notes, payment terms, and terms & conditions, each only when present.
///
/// Multi-line sections become one paragraph per non-blank line; blank lines
/// are dropped rather than kept as spacing.
pub fn text_sections(template: &DocumentTemplate, record: &DocumentRecord) -> Vec<Fragment> {
    let mut out = Vec::new();
    for section in template.sections {
        let (heading, field) = match *section {
            TextSection::Paragraph { heading, field } | TextSection::Lines { heading, field } => {
                (heading, field)
            }
        };
        let Some(body) = record.present_text(field) else {
            continue;
        };

        out.push(
            Paragraph::from_spans(
                vec![Span::new(heading, Emphasis::Bold)],
                ParagraphStyle::heading(),
            )
            .into(),
        );
        match section {
            TextSection::Paragraph { .. } => {
                out.push(Paragraph::new(body, ParagraphStyle::normal()).into());
            }
            TextSection::Lines { .. } => {
                for line in body.split('\n').filter(|l| !l.trim().is_empty()) {
                    out.push(Paragraph::new(line, ParagraphStyle::normal()).into());
                }
            }
        }
        out.push(Fragment::spacer_inches(0.1));
    }
    out
}

/// Small italic disclaimer closing the document.
pub fn footer(template: &DocumentTemplate) -> Vec<Fragment> {
    vec![
        Fragment::spacer_inches(0.2),
        Paragraph::from_spans(
            vec![Span::new(template.footer, Emphasis::Italic)],
            ParagraphStyle::footer(),
        )
        .into(),
    ]
}
