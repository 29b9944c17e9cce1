//! Demo test binary: registers a couple of suites and runs them from the command line.
//!
//! Try `suitecase-demo --list`, `suitecase-demo Math` or `suitecase-demo Text::trim`.

use std::num::ParseIntError;
use std::process::ExitCode;

use suitecase::prelude::*;

fn add(a: i32, b: i32, expected: i32) {
    compare(a + b, expected);
}

fn parse_number(text: &str) -> i32 {
    text.trim().parse().unwrap_or_else(|e: ParseIntError| raise(e))
}

fn main() -> ExitCode {
    let mut app = TestApp::new();

    app.add_test("Math", add)
        .add_test_case("add-positive", (2, 3, 5))
        .add_test_case("add-negative", (-1, -1, -2));

    app.add_test("Text", |input: &'static str, words: Vec<&'static str>| {
        let split: Vec<&str> = input.split_whitespace().collect();
        compare(split, words);
    })
    .add_test_cases([
        ("split", ("a b c", vec!["a", "b", "c"])),
        ("trim", ("  padded  ", vec!["padded"])),
        ("empty", ("", vec![])),
    ]);

    app.add_test("Parse", |text: &'static str, expected: Option<i32>| match expected {
        Some(value) => compare(parse_number(text), value),
        None => expect_failure_of::<ParseIntError, _>(|| {
            parse_number(text);
        }),
    })
    .add_test_cases([("digits", (" 42 ", Some(42))), ("letters", ("forty-two", None))]);

    app.main()
}
