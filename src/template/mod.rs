//! Quotation and invoice layouts.
//!
//! Both documents share one structure; a [`DocumentTemplate`] supplies the
//! labels, columns, and optional rows that differ. The section builders in
//! this module turn a template plus a record into layout fragments.

mod invoice;
mod quotation;
mod sections;

pub use invoice::{INVOICE, INVOICE_ACCENT, INVOICE_DESCRIPTION_LIMIT, PLACEHOLDER_HSN_CODE};
pub use quotation::{QUOTATION, QUOTATION_ACCENT, QUOTATION_DESCRIPTION_LIMIT};
pub use sections::*;

use crate::core::{DocumentKind, DocumentRecord};
use crate::layout::{Align, Color, Fragment};
use crate::options::RenderOptions;

/// Left-column lines of the party block, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyLine {
    Customer,
    ContactPerson,
    Email,
    Phone,
    Address,
    Gstin,
}

impl PartyLine {
    pub const ORDER: [PartyLine; 6] = [
        PartyLine::Customer,
        PartyLine::ContactPerson,
        PartyLine::Email,
        PartyLine::Phone,
        PartyLine::Address,
        PartyLine::Gstin,
    ];
}

/// A `Label: value` entry in the right column, shown beside `beside`.
///
/// When the left-hand line is omitted the detail row goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRow {
    pub beside: PartyLine,
    pub label: &'static str,
    pub field: &'static str,
}

/// What a line-item column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemColumn {
    /// 1-based row number.
    Serial,
    Name,
    /// Description truncated to the template limit.
    Description,
    /// Name with the truncated description in italics beneath it.
    NameWithDescription,
    /// The same literal code on every row.
    Hsn(&'static str),
    Quantity,
    /// `"<quantity> <units>"`.
    QuantityWithUnits,
    UnitPrice,
    Amount,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemColumnSpec {
    pub column: ItemColumn,
    pub header: &'static str,
    /// Column width in inches.
    pub width: f32,
    pub align: Align,
}

/// One row of the totals block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalsRow {
    Amount {
        label: &'static str,
        field: &'static str,
    },
    Blank,
    /// Bold, with a heavy rule above.
    GrandTotal {
        label: &'static str,
        field: &'static str,
    },
    /// A paid row and a bold balance row, only when the paid amount is positive.
    Payment {
        paid_label: &'static str,
        paid_field: &'static str,
        balance_label: &'static str,
        balance_field: &'static str,
    },
}

/// A free-text section below the totals, shown only when its field is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSection {
    /// The whole field as one paragraph.
    Paragraph {
        heading: &'static str,
        field: &'static str,
    },
    /// One paragraph per non-blank line of the field.
    Lines {
        heading: &'static str,
        field: &'static str,
    },
}

/// Everything that distinguishes one document kind's layout from another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentTemplate {
    pub kind: DocumentKind,
    /// Colour of the company name.
    pub accent: Color,
    /// Bold line under the company name.
    pub subtitle: Option<&'static str>,
    /// Gap after the header block, in inches.
    pub header_gap: f32,
    /// Prefix of the title line, as in `QUOTATION: Q-100`.
    pub title_label: &'static str,
    /// Append ` (Version n)` when the record's `version` exceeds 1.
    pub show_version: bool,
    pub details_heading: &'static str,
    pub details: &'static [DetailRow],
    pub bold_gstin: bool,
    pub description_limit: usize,
    pub item_columns: &'static [ItemColumnSpec],
    pub totals: &'static [TotalsRow],
    pub sections: &'static [TextSection],
    pub footer: &'static str,
}

impl DocumentTemplate {
    /// The template for a document kind.
    pub fn for_kind(kind: DocumentKind) -> &'static DocumentTemplate {
        match kind {
            DocumentKind::Quotation => &QUOTATION,
            DocumentKind::Invoice => &INVOICE,
        }
    }

    /// Lay out `record` as a flat fragment sequence in reading order.
    pub fn build(&self, record: &DocumentRecord, options: &RenderOptions) -> Vec<Fragment> {
        let mut fragments = header(self, &options.company_name);
        fragments.extend(title_line(self, record));
        fragments.push(party_block(self, record).into());
        fragments.push(Fragment::spacer_inches(0.3));
        fragments.push(items_table(self, record).into());
        fragments.push(Fragment::spacer_inches(0.2));
        fragments.push(totals_block(self, record).into());
        fragments.push(Fragment::spacer_inches(0.3));
        fragments.extend(text_sections(self, record));
        fragments.extend(footer(self));
        fragments
    }
}
