//! Source positions attached to symbols and IR functions.

use std::fmt;

/// A region of user source.
///
/// Declarations that do not come from user source (built-ins and
/// plugin-synthesized symbols) carry [`Span::SYNTHETIC`], which diagnostics
/// must treat as "not applicable" rather than as a real location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
    /// 1-based line of `start`
    pub line: u32,
    /// 1-based column of `start`
    pub column: u32,
}

impl Span {
    /// Position reported for synthesized code. Line 0 never occurs in real source.
    pub const SYNTHETIC: Span = Span {
        start: 0,
        end: 0,
        line: 0,
        column: 0,
    };

    /// Whether this span points at no user source at all
    pub fn is_synthetic(&self) -> bool {
        *self == Self::SYNTHETIC
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::SYNTHETIC
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_synthetic() {
            write!(f, "<no source>")
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}
