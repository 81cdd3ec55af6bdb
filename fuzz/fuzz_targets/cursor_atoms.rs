#![no_main]

use codec::atoms::{bits, decimal, string, varint};
use codec::DecodeLimits;
use cursor::Cursor;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::new(data);
    let limits = DecodeLimits::for_testing();
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of reads.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 9;
        idx += 1;

        match op {
            0 => {
                let _ = varint::read_small_var_uint(&mut cursor);
            }
            1 => {
                let _ = varint::read_var_uint(&mut cursor, &limits);
            }
            2 => {
                let _ = varint::read_small_var_int(&mut cursor);
            }
            3 => {
                let _ = varint::read_var_int(&mut cursor, &limits);
            }
            4 => {
                let _ = decimal::read_decimal(&mut cursor, &limits);
            }
            5 => {
                let width = (data[idx - 1] % 32).saturating_add(1);
                let _ = bits::read_bits(&mut cursor, &[width, 32 - width + 1]);
            }
            6 => {
                let _ = bits::read_bit_vec(&mut cursor, &limits);
            }
            7 => {
                let _ = string::read_string(&mut cursor, None, &limits);
            }
            _ => {
                let _ = string::read_string256(&mut cursor, None, &limits);
            }
        }
    }
});
