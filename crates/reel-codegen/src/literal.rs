//! Splicing captured values into generated source.

use regex::Regex;
use std::sync::LazyLock;

/// Test name used when a session has no name.
pub const DEFAULT_TEST_NAME: &str = "recorded_test";

static NON_IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]").unwrap());

/// How captured values are placed inside single-quoted literals.
///
/// `Verbatim` reproduces the captured text exactly, so a value containing a
/// quote or newline yields broken or altered source. `Escaped` backslash-escapes
/// those characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    #[default]
    Verbatim,
    Escaped,
}

impl Interpolation {
    pub fn from_escape_flag(escape: bool) -> Self {
        if escape {
            Interpolation::Escaped
        } else {
            Interpolation::Verbatim
        }
    }

    /// Wraps `value` in single quotes.
    pub fn quote(&self, value: &str) -> String {
        match self {
            Interpolation::Verbatim => format!("'{}'", value),
            Interpolation::Escaped => format!("'{}'", escape_single_quoted(value)),
        }
    }
}

/// Escapes a string for a single-quoted JavaScript or Python literal.
pub fn escape_single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Identifier-safe form of a session name.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`. An empty name falls back
/// to [`DEFAULT_TEST_NAME`] and a leading digit gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return DEFAULT_TEST_NAME.to_string();
    }
    let ident = NON_IDENTIFIER.replace_all(trimmed, "_").into_owned();
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", ident)
    } else {
        ident
    }
}

/// `test_`-prefixed function name for pytest discovery.
pub fn python_test_name(ident: &str) -> String {
    format!("test_{}", ident.trim_start_matches('_'))
}
