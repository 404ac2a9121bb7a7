//! Shared known-answer-test helpers, in the same spirit as a codec crate's
//! `testing` module: table-driven assertions with the failing row's index
//! printed before the panic, so a broken row is easy to spot in CI output.

use std::fmt::Debug;

/// Runs `parser` over every `(input, expected)` pair and asserts the result
/// matches, printing the row number before each assertion.
pub(crate) fn known_answer_test_parse<I, O, E, P>(tests: &[(I, O)], parser: P)
where
    I: Clone,
    O: Debug + PartialEq,
    E: Debug,
    P: Fn(I) -> Result<O, E>,
{
    for (no, (input, expected)) in tests.iter().enumerate() {
        println!("# {no}");
        let got = parser(input.clone()).expect("parsing failed");
        assert_eq!(*expected, got);
    }
}

/// Asserts that `differ(a, a)` collapses to `Equal(a)` for every `a` in
/// `values` — the equal-collapse rule, exercised as a known-answer table
/// rather than spelled out per call site.
pub(crate) fn assert_all_self_diffs_collapse<T, R>(values: &[T], differ: impl Fn(&T, &T) -> restler_types::Edit<T, R>)
where
    T: Clone + Debug + PartialEq,
    R: Debug,
{
    for (no, value) in values.iter().enumerate() {
        println!("# {no}");
        assert_eq!(differ(value, value), restler_types::Edit::Equal(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer_test_parse_runs_every_row() {
        let tests = [("2", 2_i32), ("4", 4_i32)];
        known_answer_test_parse(&tests, |s: &str| s.parse::<i32>());
    }

    #[test]
    #[should_panic]
    fn known_answer_test_parse_panics_on_mismatch() {
        let tests = [("2", 3_i32)];
        known_answer_test_parse(&tests, |s: &str| s.parse::<i32>());
    }
}
