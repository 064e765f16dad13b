//! Fuzz target for context assembly.
//!
//! The input is split at the first NUL byte into relation text and raw label
//! text, which are then counted, normalized, validated and composed,
//! checking for panics, crashes, or hangs.

#![no_main]

use cxtprep::context::fuzz_assemble;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let (relation, labels) = input.split_once('\0').unwrap_or((input, ""));
    fuzz_assemble(relation, labels);
});
