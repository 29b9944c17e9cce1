//! Property-based tests for rendering and comparison
//!
//! These tests use proptest to check the comparison rules over many generated sequences, covering lengths and
//! mismatch positions that hand-written cases would skip.

use proptest::prelude::*;
use suitecase::{Stringify, catch_failure, compare, compare_with};

/// Message of the failure `compare(actual, expected)` raises, if any.
fn compare_message(actual: &[i64], expected: &[i64]) -> Option<String> {
    catch_failure(|| compare(actual, expected))
        .err()
        .map(|failure| failure.message().to_string())
}

/// Two distinct vectors of the same length.
fn distinct_same_length() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (1usize..32)
        .prop_flat_map(|len| {
            (
                prop::collection::vec(any::<i64>(), len),
                prop::collection::vec(any::<i64>(), len),
            )
        })
        .prop_filter("vectors must differ", |(a, b)| a != b)
}

// =============================================================================
// Stringify Properties
// =============================================================================

#[cfg(test)]
mod stringify_tests {
    use super::*;

    proptest! {
        /// Property: A sequence renders as its elements' decimal text, comma-joined inside braces
        #[test]
        fn sequences_render_as_braced_list(values in prop::collection::vec(any::<i64>(), 0..32)) {
            let joined = values.iter().map(i64::to_string).collect::<Vec<_>>().join(",");
            prop_assert_eq!(values.stringify(), format!("{{{joined}}}"));
        }

        /// Property: Strings render double-quoted and unescaped
        #[test]
        fn strings_render_quoted(text in ".*") {
            prop_assert_eq!(text.stringify(), format!("\"{text}\""));
        }
    }
}

// =============================================================================
// Compare Properties
// =============================================================================

#[cfg(test)]
mod compare_tests {
    use super::*;

    proptest! {
        /// Property: Every sequence compares equal to a copy of itself
        #[test]
        fn equal_sequences_pass(values in prop::collection::vec(any::<i64>(), 0..64)) {
            let copy = values.clone();
            prop_assert_eq!(compare_message(&values, &copy), None);
        }

        /// Property: Lengths are checked before elements
        #[test]
        fn length_mismatch_reported_first(
            actual in prop::collection::vec(any::<i64>(), 0..16),
            expected in prop::collection::vec(any::<i64>(), 0..16),
        ) {
            prop_assume!(actual.len() != expected.len());
            prop_assert_eq!(
                compare_message(&actual, &expected),
                Some(format!("size mismatch - actual: {}, expected: {}", actual.len(), expected.len()))
            );
        }

        /// Property: The reported index is the first position where the sequences differ
        #[test]
        fn first_mismatch_index_reported((actual, expected) in distinct_same_length()) {
            let first = actual.iter().zip(&expected).position(|(a, b)| a != b).unwrap();
            prop_assert_eq!(
                compare_message(&actual, &expected),
                Some(format!(
                    "Item mismatch at index {first} - actual: {}, expected: {}",
                    actual.stringify(),
                    expected.stringify()
                ))
            );
        }

        /// Property: The comparator sees elements pairwise, in order, and stops at the first rejection
        #[test]
        fn comparator_stops_at_first_rejection(
            values in prop::collection::vec(any::<i32>(), 1..32),
            reject_at in any::<prop::sample::Index>(),
        ) {
            let reject_at = reject_at.index(values.len());
            let mut seen = Vec::new();
            let result = catch_failure(|| {
                compare_with(&values, &values, |a: &i32, b: &i32| {
                    seen.push(*a);
                    debug_assert_eq!(a, b);
                    seen.len() <= reject_at
                })
            });

            prop_assert!(result.is_err());
            prop_assert_eq!(&seen[..], &values[..=reject_at]);
        }

        /// Property: Scalar comparison agrees with `==`
        #[test]
        fn scalar_compare_matches_eq(a in any::<u16>(), b in any::<u16>()) {
            let result = catch_failure(|| compare(a, b));
            prop_assert_eq!(result.is_ok(), a == b);
        }
    }
}
