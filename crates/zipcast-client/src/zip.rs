//! ZIP token format check, applied before any resolution request.

use regex::Regex;
use std::sync::OnceLock;

/// 3 to 10 ASCII letters, digits, or hyphens.
pub const ZIP_PATTERN: &str = r"^[0-9A-Za-z-]{3,10}$";

#[allow(clippy::expect_used)]
fn zip_regex() -> &'static Regex {
    static ZIP_RE: OnceLock<Regex> = OnceLock::new();
    ZIP_RE.get_or_init(|| Regex::new(ZIP_PATTERN).expect("ZIP pattern is a valid regex"))
}

/// True when `token` is an acceptable ZIP token.
///
/// The empty string is not valid here; callers treat an empty field as
/// "no ZIP given" before calling this.
pub fn is_valid_zip(token: &str) -> bool {
    zip_regex().is_match(token)
}
