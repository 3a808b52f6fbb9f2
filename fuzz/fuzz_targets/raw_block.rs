#![no_main]
use libfuzzer_sys::fuzz_target;
use zmarkup::{replay, Attributes, Document, TextFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let mut doc = Document::new();
        if doc.add_tag("pre", Some(s), Attributes::new()).is_err() {
            return;
        }
        let Ok(code) = doc.render_code(&TextFormat::prod()) else {
            return;
        };
        // replay may still hit its size limits on large inputs
        if let Ok(replayed) = replay(&code) {
            assert_eq!(
                replayed.render(&TextFormat::dev()).ok(),
                doc.render(&TextFormat::dev()).ok()
            );
        }
    }
});
