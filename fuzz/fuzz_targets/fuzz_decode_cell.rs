// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use qlvalue::{decode_cell, encode_cell, CodecConfig, Cursor, TypeDescriptor};

fuzz_target!(|data: &[u8]| {
    // First byte picks the descriptor, the rest is the cell
    let Some((&selector, cell)) = data.split_first() else {
        return;
    };
    let desc = match selector % 6 {
        0 => TypeDescriptor::decimal(),
        1 => TypeDescriptor::string(),
        2 => TypeDescriptor::timeuuid(),
        3 => TypeDescriptor::list(TypeDescriptor::inet()),
        4 => TypeDescriptor::map(
            TypeDescriptor::int32(),
            TypeDescriptor::set(TypeDescriptor::timestamp()),
        ),
        _ => TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::list(
            TypeDescriptor::binary(),
        ))),
    };

    // Decimals normalise and timestamps saturate; other kinds re-encode exactly
    let canonical = !matches!(selector % 6, 0 | 4);
    if let Ok(value) = decode_cell(&desc, cell) {
        let _ = value.to_string();
        if canonical {
            assert_eq!(encode_cell(&desc, &value), cell);
        }
    }

    // Shallow depth limit on the same input
    let config = CodecConfig::default().with_max_depth(2);
    let _ = qlvalue::deserialize_with(&config, &desc, &mut Cursor::new(cell));
});
