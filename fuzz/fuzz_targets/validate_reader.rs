#![no_main]

use std::io::{Cursor, Read};

use libfuzzer_sys::fuzz_target;
use utf8stream::{Utf8Validator, ValidatingReader, ValidatorConfig};

fuzz_target!(|data: Vec<u8>| {
    let expected = std::str::from_utf8(&data).is_ok();

    for buffer_size in [1, 3, 64, 8192] {
        let config = ValidatorConfig::new(buffer_size).unwrap();

        // Verify: validate_reader agrees with std
        let result = Utf8Validator::new(config).validate_reader(Cursor::new(&data));
        assert_eq!(result.is_ok(), expected);

        // Verify: blocks reproduce the input when valid
        let blocks = Utf8Validator::new(config)
            .blocks(Cursor::new(&data))
            .collect::<Result<Vec<_>, _>>();
        match blocks {
            Ok(blocks) => {
                assert!(expected);
                assert!(blocks.iter().all(|b| b.len() <= buffer_size));
                assert_eq!(blocks.concat(), data);
            }
            Err(_) => assert!(!expected),
        }
    }

    // Verify: the pass-through reader yields the input or fails
    let mut out = Vec::new();
    let read = ValidatingReader::new(Cursor::new(&data)).read_to_end(&mut out);
    assert_eq!(read.is_ok(), expected);
    if expected {
        assert_eq!(out, data);
    }
});
