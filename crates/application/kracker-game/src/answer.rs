//! Answer matching
//!
//! Players type on phones; case and stray spacing never decide a puzzle.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Trim, uppercase and collapse whitespace runs into single spaces
pub fn normalize(input: &str) -> String {
    WHITESPACE
        .replace_all(input.trim(), " ")
        .to_ascii_uppercase()
}

/// Exact match after normalization
pub fn matches(answer: &str, expected: &str) -> bool {
    normalize(answer) == normalize(expected)
}

/// True when the answer contains any non-blank keyword
pub fn contains_any<S: AsRef<str>>(answer: &str, keywords: &[S]) -> bool {
    let answer = normalize(answer);
    keywords
        .iter()
        .map(|k| normalize(k.as_ref()))
        .filter(|k| !k.is_empty())
        .any(|k| answer.contains(&k))
}
