#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: meta line splitting.
//
// Any accepted line must yield a non-empty A-Z name and a value without
// leading spaces or tabs.
fuzz_target!(|text: &str| {
    if let Ok(field) = beacon_decoder::header::split_meta(text) {
        assert!(!field.name.is_empty());
        assert!(field.name.bytes().all(|b| b.is_ascii_uppercase()));
        assert!(!field.value.starts_with([' ', '\t']));
    }
});
