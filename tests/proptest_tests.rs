//! Property-based tests for currency formatting and document layout.
//!
//! Run with: `cargo test --test proptest_tests`

use bijak::layout::Fragment;
use bijak::{
    DocumentKind, DocumentRecord, RenderOptions, RenderedDocument, format_currency, format_decimal,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

fn record(v: Value) -> DocumentRecord {
    DocumentRecord::from_value(v).unwrap()
}

fn item_strategy() -> impl Strategy<Value = Value> {
    ("[A-Za-z ]{0,30}", "[A-Za-z0-9 ,.]{0,120}", 0u32..1000, 0i64..10_000_000).prop_map(
        |(name, description, quantity, paise)| {
            json!({
                "item_name": name,
                "description": description,
                "quantity": quantity,
                "unit_price": paise,
                "amount": Decimal::new(paise * i64::from(quantity), 2).to_string(),
            })
        },
    )
}

proptest! {
    #[test]
    fn currency_shape(cents in -1_000_000_000_000i64..1_000_000_000_000i64) {
        let formatted = format_decimal(Decimal::new(cents, 2));
        prop_assert!(formatted.starts_with('₹'));

        let body = formatted.trim_start_matches('₹').trim_start_matches('-');
        let (int_part, frac) = body.split_once('.').unwrap();
        prop_assert_eq!(frac.len(), 2);
        for (i, group) in int_part.split(',').enumerate() {
            if i == 0 {
                prop_assert!((1..=3).contains(&group.len()));
            } else {
                prop_assert_eq!(group.len(), 3);
            }
        }
        let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits.parse::<i64>().unwrap(), cents.abs());
    }

    #[test]
    fn whole_paise_format_the_same_as_decimals(
        cents in -1_000_000_000_000i64..1_000_000_000_000i64,
    ) {
        let exact = format_decimal(Decimal::new(cents, 2));
        let float = cents as f64 / 100.0;
        prop_assert_eq!(format_currency(Some(&json!(float))), exact.clone());
        prop_assert_eq!(format_currency(Some(&json!(float.to_string()))), exact);
    }

    #[test]
    fn every_item_gets_a_row(items in prop::collection::vec(item_strategy(), 0..40)) {
        let count = items.len();
        let r = record(json!({"items": items}));
        for kind in [DocumentKind::Quotation, DocumentKind::Invoice] {
            let doc = RenderedDocument::compose(kind, &r, &RenderOptions::default());
            let table = doc.fragments.iter().filter_map(Fragment::as_table).nth(1).unwrap();
            prop_assert_eq!(table.row_count(), count + 1);
        }
    }

    #[test]
    fn descriptions_never_exceed_limit(description in "\\PC{0,200}") {
        let r = record(json!({"items": [{"item_name": "X", "description": description}]}));
        let doc = RenderedDocument::compose(DocumentKind::Quotation, &r, &RenderOptions::default());
        let table = doc.fragments.iter().filter_map(Fragment::as_table).nth(1).unwrap();
        let shown = &table.cell(1, 1).unwrap().spans[0].text;
        prop_assert!(shown.chars().count() <= 50);
        prop_assert!(description.starts_with(shown.as_str()));
    }

    #[test]
    fn any_object_renders(
        fields in prop::collection::btree_map(
            "[a-z_]{1,16}",
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
                any::<i64>().prop_map(Value::from),
                "\\PC{0,40}".prop_map(Value::from),
            ],
            0..20,
        )
    ) {
        let map: serde_json::Map<String, Value> = fields.into_iter().collect();
        let r = DocumentRecord::from_map(map);
        for kind in [DocumentKind::Quotation, DocumentKind::Invoice] {
            let bytes = bijak::render(kind, &r, &RenderOptions::default()).unwrap();
            prop_assert!(bytes.starts_with(b"%PDF"));
        }
    }
}
