#![no_main]
use libfuzzer_sys::fuzz_target;
use zmarkup::{replay, TextFormat};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(doc) = replay(s) {
            let _ = doc.render(&TextFormat::dev());
            let _ = doc.render_code(&TextFormat::prod());
        }
    }
});
