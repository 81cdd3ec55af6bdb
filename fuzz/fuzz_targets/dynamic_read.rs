#![no_main]

use codec::{read_dynamic_with_limits, write_dynamic, DecodeLimits};
use cursor::Cursor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    let Ok(value) = read_dynamic_with_limits(&mut cursor, &DecodeLimits::for_testing()) else {
        return;
    };

    // Anything that decodes must re-encode to a value that decodes identically.
    let mut out = Cursor::new(vec![0u8; data.len() * 2 + 16]);
    if write_dynamic(&mut out, &value).is_ok() {
        let mut back = Cursor::new(out.written());
        let again = read_dynamic_with_limits(&mut back, &DecodeLimits::unlimited());
        assert!(matches!(again, Ok(ref v) if v.to_string() == value.to_string()));
    }
});
