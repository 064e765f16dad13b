//! Fuzz target for metadata fragment parsing and rendering.

#![no_main]

use cxtprep::metadata::fuzz_merge_fragment;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = fuzz_merge_fragment(text);
});
