//! Value comparison for test bodies.
//!
//! [`compare`] picks one of two paths from the operands' [`Operand`] view:
//!
//! - **Scalar**: the comparator is applied to the two values as a whole.
//! - **Sequence**: lengths are compared first, then elements pairwise in order. The first mismatching index is
//!   reported together with both full sequences.
//!
//! Text (`str`, `String`, `Cow<str>`) is always a scalar.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::diagnostics::{SourceLocation, fail_at};
use crate::format::Stringify;

/// How [`compare`] sees a value.
pub enum OperandView<'a, T: ?Sized> {
    Scalar(&'a T),
    Sequence(Vec<&'a T>),
}

/// A value that [`compare`] accepts.
///
/// `Unit` is what the comparator receives: the value itself for scalars, the element type for sequences.
pub trait Operand: Stringify {
    type Unit: ?Sized;

    fn view(&self) -> OperandView<'_, Self::Unit>;
}

macro_rules! scalar_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                type Unit = Self;

                fn view(&self) -> OperandView<'_, Self> {
                    OperandView::Scalar(self)
                }
            }
        )*
    };
}

scalar_operand!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, str, String,
);

impl Operand for Cow<'_, str> {
    type Unit = str;

    fn view(&self) -> OperandView<'_, str> {
        OperandView::Scalar(self.as_ref())
    }
}

impl<T: Stringify> Operand for [T] {
    type Unit = T;

    fn view(&self) -> OperandView<'_, T> {
        OperandView::Sequence(self.iter().collect())
    }
}

impl<T: Stringify, const N: usize> Operand for [T; N] {
    type Unit = T;

    fn view(&self) -> OperandView<'_, T> {
        OperandView::Sequence(self.iter().collect())
    }
}

impl<T: Stringify> Operand for Vec<T> {
    type Unit = T;

    fn view(&self) -> OperandView<'_, T> {
        OperandView::Sequence(self.iter().collect())
    }
}

macro_rules! operand_via_deref {
    ($($ptr:ty),* $(,)?) => {
        $(
            impl<T: Operand + ?Sized> Operand for $ptr {
                type Unit = T::Unit;

                fn view(&self) -> OperandView<'_, T::Unit> {
                    (**self).view()
                }
            }
        )*
    };
}

operand_via_deref!(&T, &mut T, Box<T>, Rc<T>, Arc<T>);

/// Fail the current case unless `actual` equals `expected`.
#[track_caller]
pub fn compare<A, B>(actual: A, expected: B)
where
    A: Operand,
    B: Operand,
    A::Unit: PartialEq<B::Unit>,
{
    compare_at(actual, expected, |a, b| a == b, SourceLocation::caller());
}

/// Fail the current case unless `comparator` accepts `actual` and `expected`.
///
/// For sequences the comparator is applied element by element.
#[track_caller]
pub fn compare_with<A, B, C>(actual: A, expected: B, comparator: C)
where
    A: Operand,
    B: Operand,
    C: FnMut(&A::Unit, &B::Unit) -> bool,
{
    compare_at(actual, expected, comparator, SourceLocation::caller());
}

/// [`compare_with`] with an explicit location.
pub fn compare_at<A, B, C>(actual: A, expected: B, mut comparator: C, location: SourceLocation)
where
    A: Operand,
    B: Operand,
    C: FnMut(&A::Unit, &B::Unit) -> bool,
{
    match (actual.view(), expected.view()) {
        (OperandView::Scalar(a), OperandView::Scalar(b)) => {
            if !comparator(a, b) {
                fail_at(
                    format!(
                        "Comparison failed - actual: {}, expected: {}",
                        actual.stringify(),
                        expected.stringify()
                    ),
                    location,
                );
            }
        }
        (OperandView::Sequence(a), OperandView::Sequence(b)) => {
            if a.len() != b.len() {
                fail_at(
                    format!("size mismatch - actual: {}, expected: {}", a.len(), b.len()),
                    location,
                );
            }
            if let Some(index) = a.iter().zip(&b).position(|(x, y)| !comparator(*x, *y)) {
                fail_at(
                    format!(
                        "Item mismatch at index {} - actual: {}, expected: {}",
                        index,
                        actual.stringify(),
                        expected.stringify()
                    ),
                    location,
                );
            }
        }
        _ => fail_at(
            format!(
                "Shape mismatch - actual: {}, expected: {}",
                actual.stringify(),
                expected.stringify()
            ),
            location,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::catch_failure;

    fn failure_message(f: impl FnOnce()) -> String {
        catch_failure(f).unwrap_err().message().to_string()
    }

    // ========================================
    // Scalar path
    // ========================================

    #[test]
    fn test_equal_scalars_pass() {
        assert!(catch_failure(|| compare(5, 5)).is_ok());
    }

    #[test]
    fn test_unequal_scalars_report_both_values() {
        let message = failure_message(|| compare(5, 6));
        assert_eq!(message, "Comparison failed - actual: 5, expected: 6");
    }

    #[test]
    fn test_text_compares_as_scalar() {
        assert!(catch_failure(|| compare("abc", String::from("abc"))).is_ok());
        let message = failure_message(|| compare("abc", "abd"));
        assert_eq!(message, "Comparison failed - actual: \"abc\", expected: \"abd\"");
    }

    #[test]
    fn test_custom_comparator_on_scalars() {
        let close = |a: &f64, b: &f64| (a - b).abs() < 1e-9;
        assert!(catch_failure(|| compare_with(0.1_f64 + 0.2, 0.3_f64, close)).is_ok());
        assert!(catch_failure(|| compare_with(0.1_f64, 0.3_f64, close)).is_err());
    }

    // ========================================
    // Sequence path
    // ========================================

    #[test]
    fn test_equal_sequences_pass() {
        assert!(catch_failure(|| compare(vec![1, 2, 3], [1, 2, 3])).is_ok());
        assert!(catch_failure(|| compare(&[] as &[i32], Vec::<i32>::new())).is_ok());
    }

    #[test]
    fn test_first_mismatch_index_is_reported() {
        let message = failure_message(|| compare(vec![1, 2, 3], vec![1, 2, 4]));
        assert_eq!(message, "Item mismatch at index 2 - actual: {1,2,3}, expected: {1,2,4}");
    }

    #[test]
    fn test_only_first_divergence_is_reported() {
        let message = failure_message(|| compare(vec![0, 9, 9], vec![0, 1, 2]));
        assert!(message.starts_with("Item mismatch at index 1 "));
    }

    #[test]
    fn test_length_mismatch_skips_elements() {
        let mut calls = 0;
        let message = failure_message(|| {
            compare_with(vec![1, 2], vec![1, 2, 3], |a: &i32, b: &i32| {
                calls += 1;
                a == b
            })
        });
        assert_eq!(message, "size mismatch - actual: 2, expected: 3");
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_sequences_of_text() {
        let message = failure_message(|| compare(vec!["a", "b"], vec!["a", "c"]));
        assert_eq!(message, "Item mismatch at index 1 - actual: {\"a\",\"b\"}, expected: {\"a\",\"c\"}");
    }

    #[test]
    fn test_element_comparator_is_used_for_sequences() {
        let loose = |a: &i32, b: &i32| (a - b).abs() <= 1;
        assert!(catch_failure(|| compare_with(vec![1, 2, 3], vec![2, 3, 4], loose)).is_ok());
    }

    #[test]
    fn test_scalar_against_sequence_is_a_shape_mismatch() {
        let message = failure_message(|| compare(vec![1], 1));
        assert_eq!(message, "Shape mismatch - actual: {1}, expected: 1");
    }

    #[test]
    fn test_compare_at_uses_given_location() {
        let location = SourceLocation::new("math.rs", 3, 9);
        let failure = catch_failure(|| compare_at(1_i32, 2_i32, |a: &i32, b: &i32| a == b, location.clone())).unwrap_err();
        assert_eq!(failure.location(), &location);
    }

    #[test]
    fn test_compare_reports_caller_location() {
        let line = line!() + 1;
        let failure = catch_failure(|| compare(1, 2)).unwrap_err();
        assert_eq!(failure.location().line, line);
    }
}
