//! Document content tests: what each template puts on the page for a record.

use bijak::layout::{Emphasis, Fragment};
use bijak::template::{INVOICE, QUOTATION, party_block, text_sections, totals_block};
use bijak::{DocumentKind, DocumentRecord, RenderOptions, RenderedDocument};
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn record(v: Value) -> DocumentRecord {
    DocumentRecord::from_value(v).unwrap()
}

fn lines(kind: DocumentKind, v: Value) -> Vec<String> {
    RenderedDocument::compose(kind, &record(v), &RenderOptions::default()).text_lines()
}

fn q100() -> Value {
    json!({
        "quotation_number": "Q-100",
        "customer_name": "Acme",
        "items": [{"item_name": "Chair", "quantity": 2, "unit_price": 500, "amount": 1000}],
        "total_amount": 1000
    })
}

fn full_invoice() -> Value {
    json!({
        "invoice_number": "INV-2024-017",
        "invoice_date": "2024-06-01",
        "due_date": "2024-07-01",
        "payment_terms": "Net 30",
        "customer_name": "Kerala Traders",
        "contact_person": "Anil",
        "email": "anil@example.in",
        "phone": "+91 98470 00000",
        "address": "12 MG Road",
        "city": "Kochi",
        "state": "Kerala",
        "pincode": "682001",
        "gstin": "32ABCDE1234F1Z5",
        "items": [
            {"item_name": "Laser Printer", "description": "Monochrome, duplex, network ready with 2 trays",
             "quantity": 1, "unit_price": 18000, "amount": 18000}
        ],
        "taxable_amount": 18000,
        "cgst": 1620,
        "sgst": 1620,
        "gst_amount": 3240,
        "total_amount": 21240,
        "paid_amount": 10000,
        "balance_amount": 11240,
        "terms_and_conditions": "Goods once sold will not be taken back.\n\nSubject to Kochi jurisdiction."
    })
}

// ---------------------------------------------------------------------------
// End to end
// ---------------------------------------------------------------------------

#[test]
fn quotation_q100_contents() {
    let lines = lines(DocumentKind::Quotation, q100());
    assert_eq!(lines[0], "NISSI OFFICE SYSTEMS");
    assert_eq!(lines[1], "QUOTATION: Q-100");
    assert!(lines.contains(&"Acme | Date: N/A".to_string()));
    assert!(lines.contains(&"Item | Description | Qty | Unit Price | Amount".to_string()));
    assert!(lines.contains(&"Chair | 2 pcs | ₹500.00 | ₹1,000.00".to_string()));
    assert!(lines.contains(&"GRAND TOTAL: | ₹1,000.00".to_string()));
    assert!(lines.contains(&"Subtotal (Incl. GST): | ₹1,000.00".to_string()));
    assert!(lines.contains(&"CGST (9%): | ₹0.00".to_string()));
    assert_eq!(
        lines.last().unwrap(),
        "This is a computer-generated quotation and does not require a signature."
    );
}

#[test]
fn quotation_q100_snapshot() {
    let text = lines(DocumentKind::Quotation, q100()).join("\n");
    insta::assert_snapshot!(text, @r"
    NISSI OFFICE SYSTEMS
    QUOTATION: Q-100
    BILL TO: | QUOTATION DETAILS:
    Acme | Date: N/A
    Item | Description | Qty | Unit Price | Amount
    Chair | 2 pcs | ₹500.00 | ₹1,000.00
    Subtotal (Incl. GST): | ₹1,000.00

    Taxable Amount: | ₹0.00
    CGST (9%): | ₹0.00
    SGST (9%): | ₹0.00
    Total GST (18%): | ₹0.00

    GRAND TOTAL: | ₹1,000.00
    This is a computer-generated quotation and does not require a signature.
    ");
}

#[test]
fn invoice_full_contents_in_order() {
    let lines = lines(DocumentKind::Invoice, full_invoice());
    let expected = [
        "NISSI OFFICE SYSTEMS",
        "TAX INVOICE",
        "INVOICE: INV-2024-017",
        "BILL TO: | INVOICE DETAILS:",
        "Kerala Traders | Invoice Date: 2024-06-01",
        "Anil | Due Date: 2024-07-01",
        "anil@example.in | Payment Terms: Net 30",
        "+91 98470 00000",
        "12 MG Road, Kochi, Kerala - 682001",
        "GSTIN: 32ABCDE1234F1Z5",
        "Sr | Item | HSN | Qty | Rate | Amount",
        "1 | Laser Printer Monochrome, duplex, network ready with 2 | 8471 | 1 | ₹18,000.00 | ₹18,000.00",
        "Taxable Amount: | ₹18,000.00",
        "CGST (9%): | ₹1,620.00",
        "SGST (9%): | ₹1,620.00",
        "Total GST: | ₹3,240.00",
        "",
        "TOTAL AMOUNT: | ₹21,240.00",
        "Paid: | ₹10,000.00",
        "BALANCE DUE: | ₹11,240.00",
        "Payment Terms:",
        "Net 30",
        "Terms & Conditions:",
        "Goods once sold will not be taken back.",
        "Subject to Kochi jurisdiction.",
        "This is a computer-generated invoice and is valid without signature.",
    ];
    assert_eq!(lines, expected);
}

// ---------------------------------------------------------------------------
// Optional rows
// ---------------------------------------------------------------------------

#[test]
fn optional_party_rows_follow_presence() {
    let minimal = party_block(&QUOTATION, &record(json!({"customer_name": "Acme"})));
    assert_eq!(minimal.row_count(), 2);

    let with_phone = party_block(
        &QUOTATION,
        &record(json!({"customer_name": "Acme", "phone": "0484 123", "email": ""})),
    );
    assert_eq!(
        with_phone.row_texts(),
        vec!["BILL TO: | QUOTATION DETAILS:", "Acme | Date: N/A", "0484 123"]
    );
}

#[test]
fn valid_until_needs_contact_person() {
    let r = record(json!({"contact_person": "Anil", "valid_until": "2024-08-01"}));
    let rows = party_block(&QUOTATION, &r).row_texts();
    assert_eq!(rows[2], "Anil | Valid Until: 2024-08-01");

    let r = record(json!({"valid_until": "2024-08-01"}));
    let rows = party_block(&QUOTATION, &r).row_texts();
    assert!(rows.iter().all(|row| !row.contains("Valid Until")));
}

#[test]
fn zero_paid_amount_has_no_payment_rows() {
    let mut v = full_invoice();
    v["paid_amount"] = json!(0);
    let rows = totals_block(&INVOICE, &record(v)).row_texts();
    assert!(rows.iter().all(|r| !r.contains("Paid:") && !r.contains("BALANCE DUE:")));
    assert_eq!(rows.last().unwrap(), "TOTAL AMOUNT: | ₹21,240.00");
}

#[test]
fn positive_paid_amount_adds_both_rows() {
    let r = record(json!({"paid_amount": "250.5", "balance_amount": 749.5}));
    let t = totals_block(&INVOICE, &r);
    let rows = t.row_texts();
    let n = rows.len();
    assert_eq!(rows[n - 2], "Paid: | ₹250.50");
    assert_eq!(rows[n - 1], "BALANCE DUE: | ₹749.50");
    assert_eq!(t.cell(5, n - 1).unwrap().spans[0].emphasis, Emphasis::Bold);
    assert_eq!(t.cell(5, n - 2).unwrap().spans[0].emphasis, Emphasis::Plain);
}

// ---------------------------------------------------------------------------
// Version marker
// ---------------------------------------------------------------------------

#[test]
fn version_one_has_no_marker() {
    let mut v = q100();
    v["version"] = json!(1);
    assert_eq!(lines(DocumentKind::Quotation, v)[1], "QUOTATION: Q-100");
}

#[test]
fn version_three_has_italic_marker() {
    let mut v = q100();
    v["version"] = json!(3);
    let doc = RenderedDocument::compose(DocumentKind::Quotation, &record(v), &RenderOptions::default());
    assert_eq!(doc.text_lines()[1], "QUOTATION: Q-100 (Version 3)");

    let title = doc
        .fragments
        .iter()
        .filter_map(Fragment::as_paragraph)
        .find(|p| p.plain_text().starts_with("QUOTATION"))
        .unwrap();
    assert_eq!(title.spans[1].emphasis, Emphasis::Italic);
}

#[test]
fn invoices_ignore_version() {
    let v = json!({"invoice_number": "I-1", "version": 4});
    assert_eq!(lines(DocumentKind::Invoice, v)[2], "INVOICE: I-1");
}

// ---------------------------------------------------------------------------
// Descriptions and text sections
// ---------------------------------------------------------------------------

#[test]
fn descriptions_truncate_per_template() {
    let long = "x".repeat(80);
    let v = json!({"items": [{"item_name": "A", "description": long}]});

    let q = RenderedDocument::compose(DocumentKind::Quotation, &record(v.clone()), &RenderOptions::default());
    let table = q.fragments.iter().filter_map(Fragment::as_table).nth(1).unwrap();
    assert_eq!(table.cell(1, 1).unwrap().plain_text().chars().count(), 50);

    let i = RenderedDocument::compose(DocumentKind::Invoice, &record(v), &RenderOptions::default());
    let table = i.fragments.iter().filter_map(Fragment::as_table).nth(1).unwrap();
    let cell = table.cell(1, 1).unwrap();
    assert_eq!(cell.spans[0].text, "A");
    assert_eq!(cell.spans[1].text.chars().count(), 40);
}

#[test]
fn terms_drop_blank_lines() {
    let r = record(json!({"terms_and_conditions": "First\n\n   \nSecond\n"}));
    let paragraphs: Vec<String> = text_sections(&QUOTATION, &r)
        .iter()
        .filter_map(Fragment::as_paragraph)
        .map(|p| p.plain_text())
        .collect();
    assert_eq!(paragraphs, vec!["Terms & Conditions:", "First", "Second"]);
}

#[test]
fn notes_only_on_quotations() {
    let v = json!({"notes": "Delivery in 2 weeks"});
    let q = lines(DocumentKind::Quotation, v.clone());
    assert!(q.contains(&"Notes:".to_string()));
    assert!(q.contains(&"Delivery in 2 weeks".to_string()));

    let i = lines(DocumentKind::Invoice, v);
    assert!(!i.contains(&"Notes:".to_string()));
}

#[test]
fn empty_sections_are_omitted() {
    let r = record(json!({"notes": "", "terms_and_conditions": null}));
    assert!(text_sections(&QUOTATION, &r).is_empty());
}

#[test]
fn custom_company_name() {
    let doc = RenderedDocument::compose(
        DocumentKind::Quotation,
        &record(q100()),
        &RenderOptions::default().with_company_name("Acme Traders"),
    );
    assert_eq!(doc.text_lines()[0], "Acme Traders");
}
