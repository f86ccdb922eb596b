#![no_main]

use libfuzzer_sys::fuzz_target;
use utf8stream::{Utf8State, Utf8Validator, ValidateError, validate};

fuzz_target!(|data: Vec<u8>| {
    let expected = std::str::from_utf8(&data).is_ok();

    // Verify: one-shot agrees with std
    assert_eq!(validate(&data), expected);

    // Verify: chunk invariance - split sizes derived from the input itself
    let sizes = [1, 2, 3, 5, 7, data.first().map_or(11, |&b| b as usize + 1)];
    for size in sizes {
        let state = data
            .chunks(size)
            .fold(Utf8State::new(), |state, chunk| state.advance(chunk));
        assert_eq!(state.is_complete(), expected);

        let mut validator = Utf8Validator::default();
        let result = data
            .chunks(size)
            .try_for_each(|chunk| validator.push(chunk))
            .and_then(|_| validator.finish());

        match (std::str::from_utf8(&data), result) {
            (Ok(_), Ok(len)) => assert_eq!(len, data.len() as u64),
            (Err(std_err), Err(ValidateError::InvalidUtf8(err))) => {
                // Verify: the reported byte is never before the bad sequence
                assert!(err.offset as usize >= std_err.valid_up_to());
                assert!(err.offset as usize <= data.len());
            }
            (std_result, result) => panic!("std {:?} vs stream {:?}", std_result, result),
        }
    }

    // Verify: invalid stays invalid whatever follows
    let state = Utf8State::new().advance(&data);
    if state.is_invalid() {
        assert!(state.advance(b"trailing ascii").is_invalid());
        assert!(state.advance(&data).is_invalid());
    }
});
