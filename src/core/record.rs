use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::currency;
use super::error::DocumentError;

/// Placeholder for required-looking text fields that are absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default unit label for line items.
pub const DEFAULT_UNITS: &str = "pcs";

/// A quotation or invoice as received: an untyped field map.
///
/// Every field is optional. Reads go through the accessors below, which
/// substitute defaults for missing or null values and never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRecord {
    fields: Map<String, Value>,
}

impl DocumentRecord {
    /// Wrap a parsed JSON value; only objects are accepted.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DocumentError::InputShape(json_type_name(&other))),
        }
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The field's value if present and non-null.
    pub fn get(&self, field: &str) -> Option<&Value> {
        lookup(&self.fields, field)
    }

    /// The field's value, or `default` when missing or null.
    pub fn get_or<'a>(&'a self, field: &str, default: &'a Value) -> &'a Value {
        self.get(field).unwrap_or(default)
    }

    /// Display text of the field, or `default` when missing or null.
    pub fn text(&self, field: &str, default: &str) -> String {
        self.get(field)
            .map(display_value)
            .unwrap_or_else(|| default.to_string())
    }

    /// Display text of the field, or [`NOT_AVAILABLE`].
    pub fn text_or_na(&self, field: &str) -> String {
        self.text(field, NOT_AVAILABLE)
    }

    /// Whether the field holds a non-empty, non-zero, non-false value.
    pub fn is_present(&self, field: &str) -> bool {
        self.get(field).is_some_and(is_truthy)
    }

    /// Display text of the field when it [`is_present`](Self::is_present).
    pub fn present_text(&self, field: &str) -> Option<String> {
        self.get(field).filter(|v| is_truthy(v)).map(display_value)
    }

    /// Numeric view of the field (numbers and numeric strings).
    pub fn amount(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(currency::to_amount)
    }

    /// The field formatted as currency; see [`currency::format_currency`].
    pub fn currency(&self, field: &str) -> String {
        currency::format_currency(self.get(field))
    }

    /// Line items in input order. A non-array `items` yields none.
    pub fn items(&self) -> Vec<LineItem<'_>> {
        match self.get("items") {
            Some(Value::Array(entries)) => entries.iter().map(LineItem::new).collect(),
            _ => Vec::new(),
        }
    }

    /// `address[, city][, state][ - pincode]`, or `None` without an address.
    pub fn composed_address(&self) -> Option<String> {
        let mut address = self.present_text("address")?;
        if let Some(city) = self.present_text("city") {
            address.push_str(", ");
            address.push_str(&city);
        }
        if let Some(state) = self.present_text("state") {
            address.push_str(", ");
            address.push_str(&state);
        }
        if let Some(pincode) = self.present_text("pincode") {
            address.push_str(" - ");
            address.push_str(&pincode);
        }
        Some(address)
    }
}

impl From<Map<String, Value>> for DocumentRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}

impl TryFrom<Value> for DocumentRecord {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Read-only view of one entry in `items`.
#[derive(Debug, Clone, Copy)]
pub struct LineItem<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> LineItem<'a> {
    fn new(value: &'a Value) -> Self {
        Self {
            fields: value.as_object(),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| lookup(f, field))
    }

    fn text(&self, field: &str, default: &str) -> String {
        self.get(field)
            .map(display_value)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn item_name(&self) -> String {
        self.text("item_name", "")
    }

    /// Description cut to at most `limit` characters, no ellipsis.
    pub fn description(&self, limit: usize) -> String {
        truncate_chars(&self.text("description", ""), limit)
    }

    pub fn quantity(&self) -> String {
        self.text("quantity", "0")
    }

    pub fn units(&self) -> String {
        self.text("units", DEFAULT_UNITS)
    }

    /// `"<quantity> <units>"`, e.g. `"2 pcs"`.
    pub fn quantity_with_units(&self) -> String {
        format!("{} {}", self.quantity(), self.units())
    }

    pub fn unit_price(&self) -> String {
        currency::format_currency(self.get("unit_price"))
    }

    /// The precomputed line amount; never derived from price × quantity.
    pub fn amount(&self) -> String {
        currency::format_currency(self.get("amount"))
    }
}

fn lookup<'a>(fields: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    fields.get(field).filter(|v| !v.is_null())
}

/// Text form of a JSON value as it appears on the page.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Python-style truthiness: null, false, 0, "", [] and {} are absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> DocumentRecord {
        DocumentRecord::from_value(v).unwrap()
    }

    #[test]
    fn get_skips_null() {
        let r = record(json!({"a": null, "b": 0}));
        assert!(r.get("a").is_none());
        assert_eq!(r.get("b"), Some(&json!(0)));
        assert!(r.get("missing").is_none());
        let fallback = json!("x");
        assert_eq!(r.get_or("a", &fallback), &fallback);
    }

    #[test]
    fn text_uses_default_for_missing() {
        let r = record(json!({"customer_name": "Acme", "n": 7}));
        assert_eq!(r.text_or_na("customer_name"), "Acme");
        assert_eq!(r.text_or_na("quotation_date"), NOT_AVAILABLE);
        assert_eq!(r.text("n", ""), "7");
    }

    #[test]
    fn truthiness() {
        let r = record(json!({
            "empty": "", "space": " ", "zero": 0, "zerof": 0.0, "f": false,
            "arr": [], "obj": {}, "s": "x", "n": 3
        }));
        for f in ["empty", "zero", "zerof", "f", "arr", "obj", "missing"] {
            assert!(!r.is_present(f), "{f} should be absent");
        }
        for f in ["space", "s", "n"] {
            assert!(r.is_present(f), "{f} should be present");
        }
    }

    #[test]
    fn non_object_input_is_rejected() {
        let err = DocumentRecord::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, DocumentError::InputShape("an array")));
    }

    #[test]
    fn address_composition() {
        let r = record(json!({
            "address": "12 MG Road", "city": "Kochi", "state": "Kerala", "pincode": "682001"
        }));
        assert_eq!(
            r.composed_address().unwrap(),
            "12 MG Road, Kochi, Kerala - 682001"
        );

        let r = record(json!({"address": "12 MG Road", "pincode": 682001}));
        assert_eq!(r.composed_address().unwrap(), "12 MG Road - 682001");

        let r = record(json!({"city": "Kochi"}));
        assert!(r.composed_address().is_none());
    }

    #[test]
    fn items_tolerate_bad_shapes() {
        assert!(record(json!({"items": "nope"})).items().is_empty());
        let r = record(json!({"items": [42, {"item_name": "Chair"}]}));
        let items = r.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_name(), "");
        assert_eq!(items[0].quantity_with_units(), "0 pcs");
        assert_eq!(items[1].item_name(), "Chair");
    }

    #[test]
    fn line_item_fields() {
        let r = record(json!({"items": [{
            "item_name": "Desk", "quantity": 2.5, "units": "m",
            "unit_price": "1200", "amount": 3000
        }]}));
        let item = r.items()[0];
        assert_eq!(item.quantity_with_units(), "2.5 m");
        assert_eq!(item.unit_price(), "₹1,200.00");
        assert_eq!(item.amount(), "₹3,000.00");
        assert_eq!(item.description(50), "");
    }

    #[test]
    fn truncation_counts_characters() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("ab", 3), "ab");
        assert_eq!(truncate_chars("₹₹₹₹", 2), "₹₹");
    }
}
