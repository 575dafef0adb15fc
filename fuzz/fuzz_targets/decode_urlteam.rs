#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: URLTeam-dialect reader over arbitrary bytes.
//
// The first input byte picks the shortcode width (0-15, 0 = variable),
// the rest is the dump. Catches bugs in:
// - Byte-offset slicing at the fixed width
// - Continuation-line reassembly and its pushback
// - Line break stripping on the final physical line
fuzz_target!(|data: &[u8]| {
    let Some((&width, dump)) = data.split_first() else {
        return;
    };
    let reader = beacon_decoder::BeaconReader::url_team(dump, usize::from(width & 0x0F));
    for link in reader {
        match link {
            Ok(link) => assert!(link.annotation.is_empty()),
            Err(_) => break,
        }
    }
});
