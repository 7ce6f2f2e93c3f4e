#![no_main]

use bijak::{DocumentKind, DocumentRecord, RenderOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let Ok(record) = DocumentRecord::from_value(value) else {
        return;
    };
    // Any JSON object must render; an error or panic here is a bug.
    for kind in [DocumentKind::Quotation, DocumentKind::Invoice] {
        assert!(bijak::render(kind, &record, &RenderOptions::default()).is_ok());
    }
});
