#![no_main]

use libfuzzer_sys::fuzz_target;
use suitecase::{Stringify, catch_failure, compare};

fuzz_target!(|data: &[u8]| {
    // First byte splits the input into two sequences
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let (actual, expected) = rest.split_at(usize::from(split).min(rest.len()));

    let outcome = catch_failure(|| compare(actual, expected));
    assert_eq!(outcome.is_ok(), actual == expected);

    if let Err(failure) = outcome {
        let message = failure.message();
        if actual.len() != expected.len() {
            assert!(message.starts_with("size mismatch"));
        } else {
            assert!(message.starts_with("Item mismatch at index"));
            assert!(message.ends_with(&expected.stringify()));
        }
    }

    // Text compares as a whole, never element-wise
    let (a, b) = (String::from_utf8_lossy(actual), String::from_utf8_lossy(expected));
    let text = catch_failure(|| compare(&a, &b));
    assert_eq!(text.is_ok(), a == b);
});
