use super::{
    DetailRow, DocumentTemplate, ItemColumn, ItemColumnSpec, PartyLine, TextSection, TotalsRow,
};
use crate::core::DocumentKind;
use crate::layout::{Align, Color};

/// Title colour (`#2563eb`).
pub const QUOTATION_ACCENT: Color = Color::rgb(0x25, 0x63, 0xeb);

pub const QUOTATION_DESCRIPTION_LIMIT: usize = 50;

pub const QUOTATION: DocumentTemplate = DocumentTemplate {
    kind: DocumentKind::Quotation,
    accent: QUOTATION_ACCENT,
    subtitle: None,
    header_gap: 0.2,
    title_label: "QUOTATION",
    show_version: true,
    details_heading: "QUOTATION DETAILS:",
    details: &[
        DetailRow {
            beside: PartyLine::Customer,
            label: "Date",
            field: "quotation_date",
        },
        DetailRow {
            beside: PartyLine::ContactPerson,
            label: "Valid Until",
            field: "valid_until",
        },
    ],
    bold_gstin: false,
    description_limit: QUOTATION_DESCRIPTION_LIMIT,
    item_columns: &[
        ItemColumnSpec {
            column: ItemColumn::Name,
            header: "Item",
            width: 1.8,
            align: Align::Left,
        },
        ItemColumnSpec {
            column: ItemColumn::Description,
            header: "Description",
            width: 2.2,
            align: Align::Left,
        },
        ItemColumnSpec {
            column: ItemColumn::QuantityWithUnits,
            header: "Qty",
            width: 0.8,
            align: Align::Right,
        },
        ItemColumnSpec {
            column: ItemColumn::UnitPrice,
            header: "Unit Price",
            width: 1.2,
            align: Align::Right,
        },
        ItemColumnSpec {
            column: ItemColumn::Amount,
            header: "Amount",
            width: 1.2,
            align: Align::Right,
        },
    ],
    // The rate labels are fixed text, not derived from the amounts.
    totals: &[
        TotalsRow::Amount {
            label: "Subtotal (Incl. GST):",
            field: "total_amount",
        },
        TotalsRow::Blank,
        TotalsRow::Amount {
            label: "Taxable Amount:",
            field: "taxable_amount",
        },
        TotalsRow::Amount {
            label: "CGST (9%):",
            field: "cgst",
        },
        TotalsRow::Amount {
            label: "SGST (9%):",
            field: "sgst",
        },
        TotalsRow::Amount {
            label: "Total GST (18%):",
            field: "gst_amount",
        },
        TotalsRow::Blank,
        TotalsRow::GrandTotal {
            label: "GRAND TOTAL:",
            field: "total_amount",
        },
    ],
    sections: &[
        TextSection::Paragraph {
            heading: "Notes:",
            field: "notes",
        },
        TextSection::Lines {
            heading: "Terms & Conditions:",
            field: "terms_and_conditions",
        },
    ],
    footer: "This is a computer-generated quotation and does not require a signature.",
};
