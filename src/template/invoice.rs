use super::{
    DetailRow, DocumentTemplate, ItemColumn, ItemColumnSpec, PartyLine, TextSection, TotalsRow,
};
use crate::core::DocumentKind;
use crate::layout::{Align, Color};

/// Title colour (`#dc2626`).
pub const INVOICE_ACCENT: Color = Color::rgb(0xdc, 0x26, 0x26);

pub const INVOICE_DESCRIPTION_LIMIT: usize = 40;

/// Printed in the HSN column of every line, whatever the item is.
// TODO: take the HSN code per item (and the GST rate labels) from the record
// once upstream data carries them.
pub const PLACEHOLDER_HSN_CODE: &str = "8471";

pub const INVOICE: DocumentTemplate = DocumentTemplate {
    kind: DocumentKind::Invoice,
    accent: INVOICE_ACCENT,
    subtitle: Some("TAX INVOICE"),
    header_gap: 0.1,
    title_label: "INVOICE",
    show_version: false,
    details_heading: "INVOICE DETAILS:",
    details: &[
        DetailRow {
            beside: PartyLine::Customer,
            label: "Invoice Date",
            field: "invoice_date",
        },
        DetailRow {
            beside: PartyLine::ContactPerson,
            label: "Due Date",
            field: "due_date",
        },
        DetailRow {
            beside: PartyLine::Email,
            label: "Payment Terms",
            field: "payment_terms",
        },
    ],
    bold_gstin: true,
    description_limit: INVOICE_DESCRIPTION_LIMIT,
    item_columns: &[
        ItemColumnSpec {
            column: ItemColumn::Serial,
            header: "Sr",
            width: 0.4,
            align: Align::Center,
        },
        ItemColumnSpec {
            column: ItemColumn::NameWithDescription,
            header: "Item",
            width: 2.5,
            align: Align::Left,
        },
        ItemColumnSpec {
            column: ItemColumn::Hsn(PLACEHOLDER_HSN_CODE),
            header: "HSN",
            width: 0.8,
            align: Align::Right,
        },
        ItemColumnSpec {
            column: ItemColumn::Quantity,
            header: "Qty",
            width: 0.8,
            align: Align::Right,
        },
        ItemColumnSpec {
            column: ItemColumn::UnitPrice,
            header: "Rate",
            width: 1.3,
            align: Align::Right,
        },
        ItemColumnSpec {
            column: ItemColumn::Amount,
            header: "Amount",
            width: 1.4,
            align: Align::Right,
        },
    ],
    totals: &[
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
            label: "Total GST:",
            field: "gst_amount",
        },
        TotalsRow::Blank,
        TotalsRow::GrandTotal {
            label: "TOTAL AMOUNT:",
            field: "total_amount",
        },
        TotalsRow::Payment {
            paid_label: "Paid:",
            paid_field: "paid_amount",
            balance_label: "BALANCE DUE:",
            balance_field: "balance_amount",
        },
    ],
    sections: &[
        TextSection::Paragraph {
            heading: "Payment Terms:",
            field: "payment_terms",
        },
        TextSection::Lines {
            heading: "Terms & Conditions:",
            field: "terms_and_conditions",
        },
    ],
    footer: "This is a computer-generated invoice and is valid without signature.",
};
