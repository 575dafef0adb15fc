#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: RFC-dialect reader over arbitrary bytes.
//
// Drains `BeaconReader` until end-of-stream or the first error.
// Catches bugs in:
// - BOM detection and header peeking
// - Meta line splitting and the blank-line run after the header
// - Pushback of the first link line
// - Field splitting on '|'
fuzz_target!(|data: &[u8]| {
    let reader = beacon_decoder::BeaconReader::rfc(data);
    for link in reader {
        if link.is_err() {
            break;
        }
    }
});
